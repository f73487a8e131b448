//! # Middleware Module
//!
//! Middlewares are named, pure transforms over `(path, params)` applied in
//! a fixed order before dispatch. They are the only place where routes get
//! rewritten: converting a web URL into an app route, moving query data
//! into parameters, or killing a route by converting it to the `Ignore`
//! sentinel.
//!
//! A middleware is either a leaf transform or a group of children. Groups
//! are a namespacing device, not a scoping boundary: the effective
//! execution order is a pre-order traversal of the middleware tree, run by
//! the dispatcher's pipeline.

mod core;

pub use core::{GroupBuilder, Middleware};
