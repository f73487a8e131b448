//! # navlink
//!
//! **navlink** is a deep-link / in-app routing engine: given a path (a raw
//! URL string or a pre-typed route) and a parameter bag, it resolves the
//! path through a chain of transforming middlewares, validates and binds
//! parameters against a per-route contract, and dispatches to exactly one
//! registered handler: either a screen-producing handler or a
//! side-effecting logic handler.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`path`]** - The tagged route identifier (`Web` / `AppRoute` /
//!   `Ignore`) and the raw-or-typed input accepted at the API boundary
//! - **[`params`]** - Typed parameter values, query-string parsing, merge
//!   precedence, default binding and validation
//! - **[`middleware`]** - Named, composable `(path, params)` transforms run
//!   in pre-order before dispatch
//! - **[`registry`]** - The explicit routing context: handler maps, the
//!   middleware list, the failure callback and the navigation-stack
//!   back-reference
//! - **[`dispatcher`]** - Orchestration: normalize → pipeline → validate →
//!   invoke, with the boolean-plus-callback public contract
//! - **[`config`]** - App-schema prefix and duplicate-registration policy,
//!   with environment overrides
//! - **[`errors`]** - The `NavError` taxonomy
//! - **[`ids`]** - ULID dispatch correlation ids for log correlation
//!
//! ## Quick Start
//!
//! ```no_run
//! use navlink::{
//!     Dispatcher, Middleware, NavConfig, NavPath, ParamMap, ParamSpec, Screen, ScreenHandler,
//!     ValueType,
//! };
//!
//! #[derive(Debug)]
//! struct MallScreen {
//!     mall_id: String,
//! }
//! impl Screen for MallScreen {}
//!
//! let mut nav = Dispatcher::new(NavConfig::new("app://"));
//!
//! // A screen route with a typed parameter contract.
//! nav.registry_mut()
//!     .register_screen(ScreenHandler::new(
//!         NavPath::AppRoute("app://mall".into()),
//!         vec![ParamSpec::with_default("mallId", ValueType::Str, "0")],
//!         |params| {
//!             Box::new(MallScreen {
//!                 mall_id: params.get::<String>("mallId").unwrap_or_default(),
//!             })
//!         },
//!     ))
//!     .unwrap();
//!
//! // A middleware rewriting a web URL into the app route.
//! nav.registry_mut()
//!     .register_middleware(Middleware::new("mall-rewrite", |path, params| {
//!         match path.raw() {
//!             Some(url) if url.starts_with("http://example.com/mall") => {
//!                 (NavPath::AppRoute("app://mall".into()), params)
//!             }
//!             _ => (path, params),
//!         }
//!     }))
//!     .unwrap();
//!
//! // Resolves through the middleware, validates, and produces the screen.
//! let screen = nav.resolve_screen("http://example.com/mall?mallId=42", &ParamMap::new());
//! assert!(screen.is_some());
//! ```
//!
//! ## Execution model
//!
//! The engine assumes a single logical execution context (the UI-thread
//! analogue): no locks, no atomics, `Rc`/`Weak`/`RefCell` at the
//! navigation-stack seam. Nothing suspends or performs I/O; handler
//! callbacks return synchronously. The public dispatch operations report
//! failure through a boolean return plus a process-wide failure callback
//! that always receives the original, pre-pipeline `(path, params)`.

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod handler;
pub mod ids;
pub mod middleware;
pub mod params;
pub mod path;
pub mod registry;

pub use config::{DuplicatePolicy, NavConfig, DEFAULT_APP_SCHEMA};
pub use dispatcher::Dispatcher;
pub use errors::NavError;
pub use handler::{HandlerRef, LogicHandler, NavigationStack, Screen, ScreenHandler};
pub use ids::DispatchId;
pub use middleware::{GroupBuilder, Middleware};
pub use params::{
    bind_defaults, parse_query, strip_query, validate, Callback, FromParam, ParamMap, ParamSpec,
    ParamValue, ValueType, MAX_INLINE_PARAMS,
};
pub use path::{NavPath, RouteInput};
