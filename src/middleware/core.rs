use std::fmt;

use tracing::debug;

use crate::params::ParamMap;
use crate::path::NavPath;

type TransformFn = Box<dyn Fn(NavPath, ParamMap) -> (NavPath, ParamMap)>;

/// A named, pure transform over `(path, params)`.
///
/// Immutable once constructed; identity is by `name`. A group's transform
/// is the sequential composition of its children in declared order.
///
/// Transforms fully replace both path and params for whatever runs next.
/// The pipeline does not skip remaining middlewares once one of them
/// produces [`NavPath::Ignore`]; a well-behaved transform passes the
/// sentinel through unchanged, but that is convention, not enforcement.
pub struct Middleware {
    name: String,
    kind: Kind,
}

enum Kind {
    Transform(TransformFn),
    Group(Vec<Middleware>),
}

impl Middleware {
    /// Leaf middleware from a transform function.
    pub fn new(
        name: impl Into<String>,
        transform: impl Fn(NavPath, ParamMap) -> (NavPath, ParamMap) + 'static,
    ) -> Self {
        Middleware {
            name: name.into(),
            kind: Kind::Transform(Box::new(transform)),
        }
    }

    /// Fluent builder for a group middleware composed of ordered children.
    #[must_use]
    pub fn group(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Pass-through middleware: returns its input unchanged. Useful as an
    /// observability slot since its invocation is logged like any other.
    #[must_use]
    pub fn passthrough(name: impl Into<String>) -> Self {
        Middleware::new(name, |path, params| (path, params))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply this middleware to `(path, params)`.
    ///
    /// Groups thread through their children in declared order, logging each
    /// child invocation, then return to the parent's position in the outer
    /// sequence. The effective flattening is pre-order.
    #[must_use]
    pub fn apply(&self, path: NavPath, params: ParamMap) -> (NavPath, ParamMap) {
        match &self.kind {
            Kind::Transform(transform) => transform(path, params),
            Kind::Group(children) => {
                let mut current = (path, params);
                for child in children {
                    debug!(middleware = %child.name(), path = %current.0, "will run middleware");
                    current = child.apply(current.0, current.1);
                    debug!(middleware = %child.name(), path = %current.0, "did run middleware");
                }
                current
            }
        }
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Middleware");
        dbg.field("name", &self.name);
        match &self.kind {
            Kind::Transform(_) => dbg.field("kind", &"transform"),
            Kind::Group(children) => dbg.field("children", &children.len()),
        };
        dbg.finish()
    }
}

/// Builds a group middleware from ordered children.
pub struct GroupBuilder {
    name: String,
    children: Vec<Middleware>,
}

impl GroupBuilder {
    #[must_use]
    pub fn child(mut self, middleware: Middleware) -> Self {
        self.children.push(middleware);
        self
    }

    #[must_use]
    pub fn build(self) -> Middleware {
        Middleware {
            name: self.name,
            kind: Kind::Group(self.children),
        }
    }
}
