//! # Engine Configuration
//!
//! Two knobs control the engine: the app-schema prefix that classifies raw
//! strings into app routes vs web URLs, and the policy applied when a
//! second handler is registered under an occupied path.
//!
//! ## Environment Variables
//!
//! ### `NAVLINK_APP_SCHEMA`
//!
//! Overrides the default `app://` prefix. Only affects classification of
//! raw strings; pre-typed [`NavPath`] values are never re-classified.
//!
//! ### `NAVLINK_DUPLICATE_POLICY`
//!
//! `fatal` or `reject`. Overrides the build default (`fatal` in debug
//! builds, `reject` in release builds).
//!
//! ```bash
//! export NAVLINK_APP_SCHEMA="myapp://"
//! export NAVLINK_DUPLICATE_POLICY=reject
//! ```

use std::env;

use tracing::warn;

use crate::path::NavPath;

/// App-schema prefix used when none is configured.
pub const DEFAULT_APP_SCHEMA: &str = "app://";

/// What to do when a second handler (or middleware name) is registered
/// under an occupied key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Panic. A duplicate registration is a programmer error; this is the
    /// development-time guard and the default for debug builds.
    Fatal,
    /// Keep the first registration, log a warning, reject the second.
    /// The default for release builds.
    Reject,
}

impl DuplicatePolicy {
    /// Build default: assert in debug builds, silently reject in release
    /// builds.
    #[must_use]
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) {
            DuplicatePolicy::Fatal
        } else {
            DuplicatePolicy::Reject
        }
    }
}

/// Engine configuration.
///
/// Constructed once by the host and handed to [`crate::Dispatcher::new`].
/// The app schema is settable at any time and affects only future
/// classification.
#[derive(Debug, Clone)]
pub struct NavConfig {
    app_schema: String,
    /// Applied by the registry on duplicate registrations.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APP_SCHEMA)
    }
}

impl NavConfig {
    #[must_use]
    pub fn new(app_schema: impl Into<String>) -> Self {
        let mut config = NavConfig {
            app_schema: String::new(),
            duplicate_policy: DuplicatePolicy::for_build(),
        };
        config.set_app_schema(app_schema);
        config
    }

    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = match env::var("NAVLINK_APP_SCHEMA") {
            Ok(schema) => Self::new(schema),
            Err(_) => Self::default(),
        };
        if let Ok(policy) = env::var("NAVLINK_DUPLICATE_POLICY") {
            match policy.to_ascii_lowercase().as_str() {
                "fatal" => config.duplicate_policy = DuplicatePolicy::Fatal,
                "reject" => config.duplicate_policy = DuplicatePolicy::Reject,
                other => warn!(
                    value = %other,
                    "unrecognized NAVLINK_DUPLICATE_POLICY, keeping build default"
                ),
            }
        }
        config
    }

    #[must_use]
    pub fn app_schema(&self) -> &str {
        &self.app_schema
    }

    /// Set the app-schema prefix used to classify raw strings.
    ///
    /// A prefix that is itself a web-style scheme (`http`, `https`, `ftp`)
    /// would classify every web URL as an app route. That is reported as a
    /// configuration-time warning but still applied; which strings count
    /// as in-app routes is the host's call, not the engine's.
    pub fn set_app_schema(&mut self, schema: impl Into<String>) {
        let schema = schema.into();
        let lower = schema.to_ascii_lowercase();
        if lower.starts_with("http") || lower.starts_with("ftp") {
            warn!(
                schema = %schema,
                "app schema looks like a web scheme; web URLs will classify as app routes"
            );
        }
        self.app_schema = schema;
    }

    /// Classify a raw string: `AppRoute` iff it starts with the app-schema
    /// prefix, else `Web`. The `Ignore` sentinel is never produced here; it
    /// exists only by explicit construction.
    #[must_use]
    pub fn classify(&self, raw: &str) -> NavPath {
        if raw.starts_with(&self.app_schema) {
            NavPath::AppRoute(raw.to_string())
        } else {
            NavPath::Web(raw.to_string())
        }
    }
}
