//! Error taxonomy for registration, resolution and validation failures.

use thiserror::Error;

/// Everything that can go wrong while registering routes or dispatching to
/// them.
///
/// The public dispatch operations collapse these to a boolean plus the
/// registry's failure callback; the structured variants are what the
/// registry's `Result` returns and the internal resolution path use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A handler (of either kind) or a middleware name already occupies this
    /// key. The first registration stays; the second is rejected. Under
    /// [`crate::DuplicatePolicy::Fatal`] this panics instead of being
    /// returned.
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),

    /// The pipeline produced a path no handler is registered for.
    #[error("no handler registered for {0}")]
    NoMatchingHandler(String),

    /// The route resolved to the `Ignore` sentinel, either supplied by the
    /// caller or produced by a middleware. Deliberate, quieter than
    /// `NoMatchingHandler`.
    #[error("route resolved to the ignore sentinel")]
    RouteIgnored,

    /// A stack transition was requested but no navigation stack is
    /// configured (or the host has dropped it).
    #[error("no navigation stack configured")]
    MissingNavigationContext,

    /// A parameter is present but its value's type tag does not match the
    /// route's spec.
    #[error("parameter `{0}` has the wrong type")]
    TypeMismatch(String),

    /// A parameter required by the route's spec is absent and the spec
    /// declares no default.
    #[error("required parameter `{0}` is missing")]
    MissingRequired(String),

    /// A path of an unacceptable representation was supplied where an app
    /// route is required, e.g. registering a handler under a `Web` path.
    #[error("expected an app route, got {0}")]
    InvalidPathType(String),
}
