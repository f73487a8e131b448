//! Path model: the tagged identifier of a route.
//!
//! Native code never pattern-matches on URL templates. A route is keyed by
//! one exact string, and the only classification the engine performs is
//! "does this string start with the app-schema prefix". Everything richer
//! (rewriting web URLs into app routes, killing a route entirely) is the
//! job of middlewares.

use std::fmt;

/// The tagged identifier of a route.
///
/// Equality, and therefore registry lookup, is by variant tag plus the
/// exact string payload. `app://mall` and `app://mall/` are two different
/// routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavPath {
    /// An external web URL: any raw string that does not start with the
    /// configured app-schema prefix.
    Web(String),
    /// An app-internal route: the raw string starts with the app-schema
    /// prefix. Handlers may only be registered under this variant.
    AppRoute(String),
    /// Terminal sentinel: "do not dispatch". Distinct from "no handler
    /// found"; a middleware that recognizes and consumes a route converts
    /// it to `Ignore` on purpose.
    Ignore,
}

impl NavPath {
    /// The raw string payload; `None` for the sentinel.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            NavPath::Web(url) | NavPath::AppRoute(url) => Some(url),
            NavPath::Ignore => None,
        }
    }

    #[must_use]
    pub fn is_web(&self) -> bool {
        matches!(self, NavPath::Web(_))
    }

    #[must_use]
    pub fn is_app_route(&self) -> bool {
        matches!(self, NavPath::AppRoute(_))
    }

    #[must_use]
    pub fn is_ignore(&self) -> bool {
        matches!(self, NavPath::Ignore)
    }

    /// Same variant, new payload. The sentinel carries no payload and is
    /// returned unchanged.
    pub(crate) fn with_raw(&self, raw: String) -> NavPath {
        match self {
            NavPath::Web(_) => NavPath::Web(raw),
            NavPath::AppRoute(_) => NavPath::AppRoute(raw),
            NavPath::Ignore => NavPath::Ignore,
        }
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavPath::Web(url) => write!(f, "web({url})"),
            NavPath::AppRoute(url) => write!(f, "app({url})"),
            NavPath::Ignore => f.write_str("ignore"),
        }
    }
}

/// Route input accepted by every public dispatcher operation: either a raw
/// URL string or an already-typed [`NavPath`].
///
/// Normalization happens exactly once at the dispatcher boundary
/// ([`crate::Dispatcher::normalize`]); internal logic only ever sees
/// [`NavPath`].
#[derive(Debug, Clone)]
pub enum RouteInput {
    /// A raw string, classified against the configured app schema.
    Raw(String),
    /// A pre-typed path, passed through unchanged.
    Typed(NavPath),
}

impl From<&str> for RouteInput {
    fn from(raw: &str) -> Self {
        RouteInput::Raw(raw.to_string())
    }
}

impl From<String> for RouteInput {
    fn from(raw: String) -> Self {
        RouteInput::Raw(raw)
    }
}

impl From<NavPath> for RouteInput {
    fn from(path: NavPath) -> Self {
        RouteInput::Typed(path)
    }
}
