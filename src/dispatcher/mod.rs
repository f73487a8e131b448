//! # Dispatcher Module
//!
//! The dispatcher orchestrates a navigation from raw input to handler
//! invocation:
//!
//! 1. **Normalize**: raw strings are classified against the app schema;
//!    typed paths pass through. Internal logic only ever sees [`NavPath`].
//! 2. **Pipeline**: the path's own query string is parsed and merged under
//!    the caller's explicit params (caller wins), then `(path, params)` is
//!    threaded through every registered middleware in pre-order.
//! 3. **Validate**: the matched handler's parameter specs are bound
//!    (defaults) and checked (type tags, required keys).
//! 4. **Invoke**: the screen factory or logic action runs synchronously;
//!    screens are handed to the host's navigation stack.
//!
//! Every public operation returns a bare success boolean. Structured errors
//! exist internally but are collapsed at this boundary to the boolean plus
//! the registry's failure callback, which always receives the original,
//! pre-pipeline `(path, params)`.
//!
//! [`NavPath`]: crate::path::NavPath

mod core;

pub use core::Dispatcher;
