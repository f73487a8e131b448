//! Handler registry: the explicit, host-owned routing context.
//!
//! There is no global mutable state. The host constructs a registry (via
//! [`crate::Dispatcher::new`]), registers handlers and middlewares through
//! it, and tears it down with the process. Pure runtime state, nothing
//! persisted.
//!
//! Invariant: no two handlers, of either kind, are ever registered under
//! the same path. A second registration for an occupied path is rejected;
//! under [`DuplicatePolicy::Fatal`] that rejection is a panic (the
//! development-time guard), under [`DuplicatePolicy::Reject`] a logged
//! no-op.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{error, info, warn};

use crate::config::DuplicatePolicy;
use crate::errors::NavError;
use crate::handler::{HandlerRef, LogicHandler, NavigationStack, ScreenHandler};
use crate::middleware::Middleware;
use crate::params::ParamMap;
use crate::path::NavPath;

type FailureFn = Box<dyn Fn(&NavPath, &ParamMap)>;

/// Routing state: handler maps, the ordered middleware list, the failure
/// callback and the navigation-stack back-reference.
pub struct Registry {
    screen_handlers: HashMap<NavPath, ScreenHandler>,
    logic_handlers: HashMap<NavPath, LogicHandler>,
    middlewares: Vec<Middleware>,
    on_failure: FailureFn,
    nav_stack: Option<Weak<RefCell<dyn NavigationStack>>>,
    duplicate_policy: DuplicatePolicy,
}

impl Registry {
    #[must_use]
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Registry {
            screen_handlers: HashMap::new(),
            logic_handlers: HashMap::new(),
            middlewares: Vec::new(),
            on_failure: Box::new(|path, params| {
                error!(path = %path, params = ?params, "navigation failed");
            }),
            nav_stack: None,
            duplicate_policy,
        }
    }

    /// Register a screen handler under its path.
    ///
    /// Rejects non-app-route paths (`InvalidPathType`) and occupied paths
    /// (`DuplicateRegistration`, subject to the duplicate policy).
    pub fn register_screen(&mut self, handler: ScreenHandler) -> Result<(), NavError> {
        self.check_registrable(handler.path())?;
        info!(path = %handler.path(), "registered screen handler");
        self.screen_handlers.insert(handler.path().clone(), handler);
        Ok(())
    }

    /// Register a logic handler under its path. Same rejection rules as
    /// [`Registry::register_screen`].
    pub fn register_logic(&mut self, handler: LogicHandler) -> Result<(), NavError> {
        self.check_registrable(handler.path())?;
        info!(path = %handler.path(), "registered logic handler");
        self.logic_handlers.insert(handler.path().clone(), handler);
        Ok(())
    }

    /// Append a middleware to the pipeline. Names must be unique; a
    /// duplicate name is rejected under the same policy as handler paths.
    pub fn register_middleware(&mut self, middleware: Middleware) -> Result<(), NavError> {
        if self.middlewares.iter().any(|m| m.name() == middleware.name()) {
            return Err(self.reject_duplicate(middleware.name()));
        }
        info!(middleware = %middleware.name(), "registered middleware");
        self.middlewares.push(middleware);
        Ok(())
    }

    /// Remove the handler (of either kind) registered under `path`.
    /// Removing an absent entry is a harmless no-op.
    pub fn unregister(&mut self, path: &NavPath) -> bool {
        let removed =
            self.screen_handlers.remove(path).is_some() || self.logic_handlers.remove(path).is_some();
        if removed {
            info!(path = %path, "unregistered handler");
        }
        removed
    }

    /// Remove every middleware with the given name.
    pub fn unregister_middleware(&mut self, name: &str) -> bool {
        let before = self.middlewares.len();
        self.middlewares.retain(|m| m.name() != name);
        let removed = self.middlewares.len() != before;
        if removed {
            info!(middleware = %name, "unregistered middleware");
        }
        removed
    }

    /// Look up the handler for `path`: screen map first, then logic map.
    /// The uniqueness invariant guarantees at most one hit across both.
    #[must_use]
    pub fn lookup(&self, path: &NavPath) -> Option<HandlerRef<'_>> {
        self.screen_handlers
            .get(path)
            .map(HandlerRef::Screen)
            .or_else(|| self.logic_handlers.get(path).map(HandlerRef::Logic))
    }

    #[must_use]
    pub fn screen_handler(&self, path: &NavPath) -> Option<&ScreenHandler> {
        self.screen_handlers.get(path)
    }

    #[must_use]
    pub fn logic_handler(&self, path: &NavPath) -> Option<&LogicHandler> {
        self.logic_handlers.get(path)
    }

    /// All registered handlers, both kinds, in no particular order.
    pub fn handlers(&self) -> impl Iterator<Item = HandlerRef<'_>> {
        self.screen_handlers
            .values()
            .map(HandlerRef::Screen)
            .chain(self.logic_handlers.values().map(HandlerRef::Logic))
    }

    /// Registered screen handlers, in no particular order.
    pub fn screen_handlers(&self) -> impl Iterator<Item = &ScreenHandler> {
        self.screen_handlers.values()
    }

    /// Registered logic handlers, in no particular order.
    pub fn logic_handlers(&self) -> impl Iterator<Item = &LogicHandler> {
        self.logic_handlers.values()
    }

    /// Top-level middlewares in registration order.
    #[must_use]
    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    /// Point the registry at the host's navigation stack.
    ///
    /// Only a `Weak` is kept: the registry reads the stack but never
    /// controls its lifetime.
    pub fn set_nav_stack<S: NavigationStack + 'static>(&mut self, stack: &Rc<RefCell<S>>) {
        let coerced: Rc<RefCell<dyn NavigationStack>> = stack.clone() as Rc<RefCell<dyn NavigationStack>>;
        self.nav_stack = Some(Rc::downgrade(&coerced));
    }

    /// The live navigation stack, if one is configured and the host still
    /// owns it.
    #[must_use]
    pub fn nav_stack(&self) -> Option<Rc<RefCell<dyn NavigationStack>>> {
        self.nav_stack.as_ref()?.upgrade()
    }

    /// Replace the failure callback. It receives the original, pre-pipeline
    /// `(path, params)` on every failed dispatch. The default logs at
    /// `error!`.
    pub fn set_failure_handler(&mut self, handler: impl Fn(&NavPath, &ParamMap) + 'static) {
        self.on_failure = Box::new(handler);
    }

    pub(crate) fn fail(&self, path: &NavPath, params: &ParamMap) {
        (self.on_failure)(path, params);
    }

    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    fn check_registrable(&self, path: &NavPath) -> Result<(), NavError> {
        if !path.is_app_route() {
            warn!(path = %path, "handlers must be registered under an app route");
            return Err(NavError::InvalidPathType(path.to_string()));
        }
        if self.screen_handlers.contains_key(path) || self.logic_handlers.contains_key(path) {
            return Err(self.reject_duplicate(&path.to_string()));
        }
        Ok(())
    }

    fn reject_duplicate(&self, occupied: &str) -> NavError {
        let err = NavError::DuplicateRegistration(occupied.to_string());
        match self.duplicate_policy {
            // Development-time guard; never expected to trigger in a
            // correctly configured production build.
            #[allow(clippy::panic)]
            DuplicatePolicy::Fatal => panic!("{err}"),
            DuplicatePolicy::Reject => {
                warn!(registration = %occupied, "duplicate registration rejected");
                err
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DuplicatePolicy::for_build())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("screen_handlers", &self.screen_handlers.len())
            .field("logic_handlers", &self.logic_handlers.len())
            .field("middlewares", &self.middlewares.len())
            .field("nav_stack", &self.nav_stack.is_some())
            .field("duplicate_policy", &self.duplicate_policy)
            .finish_non_exhaustive()
    }
}
