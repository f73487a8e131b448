use tracing::{debug, error, info, info_span, warn};

use crate::config::NavConfig;
use crate::errors::NavError;
use crate::handler::{HandlerRef, Screen};
use crate::ids::DispatchId;
use crate::params::{self, ParamMap};
use crate::path::{NavPath, RouteInput};
use crate::registry::Registry;

/// Orchestrates dispatch: normalize → middleware pipeline → validate →
/// handler invocation, reporting success or failure.
///
/// Owns the [`Registry`] and the [`NavConfig`]; hosts mutate routing state
/// through [`Dispatcher::registry_mut`]. Construct one per logical
/// execution context. The engine is deliberately single-context and
/// `!Send`; tests build a fresh dispatcher each.
pub struct Dispatcher {
    config: NavConfig,
    registry: Registry,
}

impl Dispatcher {
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        let registry = Registry::new(config.duplicate_policy);
        Dispatcher { config, registry }
    }

    /// Assemble from an already-populated registry.
    #[must_use]
    pub fn with_registry(config: NavConfig, registry: Registry) -> Self {
        Dispatcher { config, registry }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    #[must_use]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Change the app-schema prefix; affects only future classification.
    pub fn set_app_schema(&mut self, schema: impl Into<String>) {
        self.config.set_app_schema(schema);
    }

    /// The single normalization entry point: raw strings are classified
    /// against the configured app schema, typed paths pass through
    /// unchanged.
    #[must_use]
    pub fn normalize(&self, input: impl Into<RouteInput>) -> NavPath {
        match input.into() {
            RouteInput::Typed(path) => path,
            RouteInput::Raw(raw) => self.config.classify(&raw),
        }
    }

    /// Resolve `input` to a produced screen without touching the
    /// navigation stack.
    ///
    /// On any failure (ignored route, no screen handler, validation)
    /// invokes the failure callback with the original `(path, params)` and
    /// returns `None`.
    #[must_use]
    pub fn resolve_screen(
        &self,
        input: impl Into<RouteInput>,
        params: &ParamMap,
    ) -> Option<Box<dyn Screen>> {
        let original = self.normalize(input);
        let id = DispatchId::new();
        let span = info_span!("dispatch", op = "resolve_screen", dispatch_id = %id, path = %original);
        let _guard = span.enter();
        match self.try_resolve_screen(&original, params) {
            Ok(screen) => Some(screen),
            Err(err) => {
                self.fail(&original, params, &err);
                None
            }
        }
    }

    /// Resolve `input` and push the produced screen onto the navigation
    /// stack.
    ///
    /// Fails fast, before the pipeline runs at all, when no stack is
    /// configured: a push that cannot display anything has no business
    /// executing middlewares.
    pub fn push(&self, input: impl Into<RouteInput>, params: &ParamMap, animated: bool) -> bool {
        let original = self.normalize(input);
        let id = DispatchId::new();
        let span = info_span!("dispatch", op = "push", dispatch_id = %id, path = %original);
        let _guard = span.enter();
        let Some(stack) = self.registry.nav_stack() else {
            self.fail(&original, params, &NavError::MissingNavigationContext);
            return false;
        };
        match self.try_resolve_screen(&original, params) {
            Ok(screen) => {
                info!(path = %original, animated, "pushing screen");
                stack.borrow_mut().push(screen, animated);
                true
            }
            Err(err) => {
                self.fail(&original, params, &err);
                false
            }
        }
    }

    /// Resolve `input` and present the produced screen modally.
    ///
    /// Unlike [`Dispatcher::push`] the stack is required only once a screen
    /// has actually been resolved.
    pub fn present(&self, input: impl Into<RouteInput>, params: &ParamMap, animated: bool) -> bool {
        let original = self.normalize(input);
        let id = DispatchId::new();
        let span = info_span!("dispatch", op = "present", dispatch_id = %id, path = %original);
        let _guard = span.enter();
        match self.try_resolve_screen(&original, params) {
            Ok(screen) => match self.registry.nav_stack() {
                Some(stack) => {
                    info!(path = %original, animated, "presenting screen");
                    stack.borrow_mut().present(screen, animated);
                    true
                }
                None => {
                    self.fail(&original, params, &NavError::MissingNavigationContext);
                    false
                }
            },
            Err(err) => {
                self.fail(&original, params, &err);
                false
            }
        }
    }

    /// Dispatch `input` to whichever handler kind is registered for it.
    ///
    /// A logic handler runs its side effect (no screen, no stack, the
    /// `animated` flag does not apply); a screen handler's screen is pushed
    /// onto the stack. Returns `true` only on a fully successful
    /// validate-and-invoke.
    pub fn handle(&self, input: impl Into<RouteInput>, params: &ParamMap, animated: bool) -> bool {
        let original = self.normalize(input);
        let id = DispatchId::new();
        let span = info_span!("dispatch", op = "handle", dispatch_id = %id, path = %original);
        let _guard = span.enter();
        match self.try_handle(&original, params, animated) {
            Ok(()) => true,
            Err(err) => {
                self.fail(&original, params, &err);
                false
            }
        }
    }

    /// Run the middleware pipeline over `path`.
    ///
    /// The sentinel as *input* skips query parsing and the chain entirely.
    /// Mid-pipeline, however, `Ignore` does not short-circuit: every
    /// remaining middleware still runs and receives the sentinel as its
    /// input path. Multiple hosts rely on middlewares observing the full
    /// sequence regardless of an earlier `Ignore`; do not "fix" this
    /// without flagging it as a behavior change.
    fn run_pipeline(&self, path: &NavPath, caller_params: &ParamMap) -> (NavPath, ParamMap) {
        let Some(raw) = path.raw() else {
            return (NavPath::Ignore, caller_params.clone());
        };

        // The path's own query string seeds the bag; explicit caller params
        // win. The path itself is rebased to its query-less form, which is
        // also what registry lookup is keyed on.
        let mut current_params = params::parse_query(raw).merge(caller_params);
        let mut current_path = path.with_raw(params::strip_query(raw).to_string());

        for middleware in self.registry.middlewares() {
            debug!(middleware = %middleware.name(), path = %current_path, "will run middleware");
            (current_path, current_params) = middleware.apply(current_path, current_params);
            debug!(middleware = %middleware.name(), path = %current_path, "did run middleware");
        }

        if current_path.is_web() {
            // Consistency error: no middleware rewrote the web URL into an
            // app-addressable route. Logged, not fatal; lookup fails next.
            error!(path = %current_path, "pipeline finished on a web path");
        }

        (current_path, current_params)
    }

    fn try_resolve_screen(
        &self,
        original: &NavPath,
        caller_params: &ParamMap,
    ) -> Result<Box<dyn Screen>, NavError> {
        let (path, merged) = self.run_pipeline(original, caller_params);
        if path.is_ignore() {
            return Err(NavError::RouteIgnored);
        }
        let handler = self
            .registry
            .screen_handler(&path)
            .ok_or_else(|| NavError::NoMatchingHandler(path.to_string()))?;
        let bound = params::bind_defaults(handler.specs(), &merged);
        params::validate(handler.specs(), &bound)?;
        Ok(handler.produce(&bound))
    }

    fn try_handle(
        &self,
        original: &NavPath,
        caller_params: &ParamMap,
        animated: bool,
    ) -> Result<(), NavError> {
        let (path, merged) = self.run_pipeline(original, caller_params);
        if path.is_ignore() {
            return Err(NavError::RouteIgnored);
        }
        let handler = self
            .registry
            .lookup(&path)
            .ok_or_else(|| NavError::NoMatchingHandler(path.to_string()))?;
        match handler {
            HandlerRef::Logic(logic) => {
                let bound = params::bind_defaults(logic.specs(), &merged);
                params::validate(logic.specs(), &bound)?;
                logic.run(&bound);
                info!(path = %path, "logic handler ran");
                Ok(())
            }
            HandlerRef::Screen(screen_handler) => {
                let bound = params::bind_defaults(screen_handler.specs(), &merged);
                params::validate(screen_handler.specs(), &bound)?;
                let stack = self
                    .registry
                    .nav_stack()
                    .ok_or(NavError::MissingNavigationContext)?;
                let screen = screen_handler.produce(&bound);
                info!(path = %path, animated, "pushing screen");
                stack.borrow_mut().push(screen, animated);
                Ok(())
            }
        }
    }

    /// Collapse an internal error to the public contract: a log line plus
    /// the failure callback carrying the original, pre-pipeline values.
    fn fail(&self, original: &NavPath, original_params: &ParamMap, err: &NavError) {
        if matches!(err, NavError::RouteIgnored) {
            info!(path = %original, "route ignored");
        } else {
            warn!(path = %original, error = %err, "route unresolved");
        }
        self.registry.fail(original, original_params);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}
