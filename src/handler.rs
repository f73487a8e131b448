//! Handler variants and the external collaborator seams.
//!
//! The engine dispatches to exactly one of two handler kinds: a
//! [`ScreenHandler`] that produces a displayable [`Screen`], or a
//! [`LogicHandler`] that performs a side effect and produces nothing. What
//! a screen *is* and how it gets displayed are the host's business; the
//! engine only hands produced screens to the host's [`NavigationStack`].

use std::fmt;

use crate::params::{ParamMap, ParamSpec};
use crate::path::NavPath;

/// Marker for the displayable object a screen handler produces.
///
/// The engine never inspects a screen. Hosts implement this for their
/// view/controller type.
pub trait Screen: fmt::Debug {}

/// The host's navigation stack.
///
/// From the engine's point of view this is a non-owning back-reference:
/// the registry holds a `Weak` to it, and a dead reference at push time is
/// a reported failure, never a fatal error.
pub trait NavigationStack {
    /// Push `screen` onto the stack.
    fn push(&mut self, screen: Box<dyn Screen>, animated: bool);
    /// Present `screen` modally over the stack.
    fn present(&mut self, screen: Box<dyn Screen>, animated: bool);
}

type ProduceFn = Box<dyn Fn(&ParamMap) -> Box<dyn Screen>>;
type RunFn = Box<dyn Fn(&ParamMap)>;

/// Screen-producing route handler.
///
/// Owns its path and parameter specs immutably after construction. The
/// `produce` callback is invoked with validated, default-bound parameters
/// and must return synchronously.
pub struct ScreenHandler {
    path: NavPath,
    specs: Vec<ParamSpec>,
    produce: ProduceFn,
}

impl ScreenHandler {
    pub fn new(
        path: NavPath,
        specs: Vec<ParamSpec>,
        produce: impl Fn(&ParamMap) -> Box<dyn Screen> + 'static,
    ) -> Self {
        ScreenHandler {
            path,
            specs,
            produce: Box::new(produce),
        }
    }

    #[must_use]
    pub fn path(&self) -> &NavPath {
        &self.path
    }

    #[must_use]
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Invoke the screen factory.
    #[must_use]
    pub fn produce(&self, params: &ParamMap) -> Box<dyn Screen> {
        (self.produce)(params)
    }
}

impl fmt::Debug for ScreenHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenHandler")
            .field("path", &self.path)
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}

/// Side-effecting route handler: no screen, no stack interaction.
pub struct LogicHandler {
    path: NavPath,
    specs: Vec<ParamSpec>,
    run: RunFn,
}

impl LogicHandler {
    pub fn new(path: NavPath, specs: Vec<ParamSpec>, run: impl Fn(&ParamMap) + 'static) -> Self {
        LogicHandler {
            path,
            specs,
            run: Box::new(run),
        }
    }

    #[must_use]
    pub fn path(&self) -> &NavPath {
        &self.path
    }

    #[must_use]
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Invoke the side-effecting action.
    pub fn run(&self, params: &ParamMap) {
        (self.run)(params)
    }
}

impl fmt::Debug for LogicHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicHandler")
            .field("path", &self.path)
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}

/// Lookup result over both handler maps.
#[derive(Debug, Clone, Copy)]
pub enum HandlerRef<'a> {
    Screen(&'a ScreenHandler),
    Logic(&'a LogicHandler),
}

impl HandlerRef<'_> {
    #[must_use]
    pub fn path(&self) -> &NavPath {
        match self {
            HandlerRef::Screen(h) => h.path(),
            HandlerRef::Logic(h) => h.path(),
        }
    }

    #[must_use]
    pub fn specs(&self) -> &[ParamSpec] {
        match self {
            HandlerRef::Screen(h) => h.specs(),
            HandlerRef::Logic(h) => h.specs(),
        }
    }
}
