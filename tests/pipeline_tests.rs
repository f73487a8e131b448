//! Tests for the middleware pipeline: ordering, composition, query
//! handling and the ignore sentinel's (deliberately) permissive semantics.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use navlink::{Dispatcher, Middleware, NavConfig, NavPath, ParamMap};

mod tracing_util;
use tracing_util::TestTracing;

fn dispatcher() -> Dispatcher {
    Dispatcher::new(NavConfig::new("app://"))
}

/// Leaf middleware that appends its name to a shared order log.
fn recording(name: &str, order: &Rc<RefCell<Vec<String>>>) -> Middleware {
    let order = Rc::clone(order);
    let tag = name.to_string();
    Middleware::new(name, move |path, params| {
        order.borrow_mut().push(tag.clone());
        (path, params)
    })
}

#[test]
fn nested_groups_flatten_in_pre_order() {
    let _tracing = TestTracing::init();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut nav = dispatcher();

    let group = Middleware::group("parent")
        .child(recording("m1", &order))
        .child(recording("m2", &order))
        .build();
    nav.registry_mut().register_middleware(group).unwrap();
    nav.registry_mut()
        .register_middleware(recording("m3", &order))
        .unwrap();

    // No handler registered; dispatch fails, but the pipeline still ran.
    assert!(!nav.handle("app://nowhere", &ParamMap::new(), false));
    assert_eq!(*order.borrow(), vec!["m1", "m2", "m3"]);
}

#[test]
fn ignore_does_not_short_circuit_the_chain() {
    let _tracing = TestTracing::init();
    let mut nav = dispatcher();

    nav.registry_mut()
        .register_middleware(Middleware::new("a-kills-route", |_, params| {
            (NavPath::Ignore, params)
        }))
        .unwrap();

    let b_calls = Rc::new(Cell::new(0u32));
    let b_input = Rc::new(RefCell::new(None::<NavPath>));
    let calls = Rc::clone(&b_calls);
    let input = Rc::clone(&b_input);
    nav.registry_mut()
        .register_middleware(Middleware::new("b-still-runs", move |path, params| {
            calls.set(calls.get() + 1);
            *input.borrow_mut() = Some(path.clone());
            (path, params)
        }))
        .unwrap();

    assert!(!nav.handle("app://mall", &ParamMap::new(), false));
    // B ran exactly once and saw the sentinel as its input path.
    assert_eq!(b_calls.get(), 1);
    assert_eq!(*b_input.borrow(), Some(NavPath::Ignore));
}

#[test]
fn sentinel_as_input_skips_the_chain_entirely() {
    let _tracing = TestTracing::init();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut nav = dispatcher();
    nav.registry_mut()
        .register_middleware(recording("observer", &order))
        .unwrap();

    assert!(!nav.handle(NavPath::Ignore, &ParamMap::new(), false));
    assert!(order.borrow().is_empty());
}

#[test]
fn middlewares_see_the_query_less_path_with_query_moved_into_params() {
    let _tracing = TestTracing::init();
    let mut nav = dispatcher();

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    nav.registry_mut()
        .register_middleware(Middleware::new("observe", move |path, params| {
            *sink.borrow_mut() = Some((path.clone(), params.clone()));
            (path, params)
        }))
        .unwrap();

    let _ = nav.handle("app://mall?mallId=42", &ParamMap::new(), false);

    let (path, params) = seen.borrow().clone().unwrap();
    assert_eq!(path, NavPath::AppRoute("app://mall".into()));
    assert_eq!(params.get::<String>("mallId").as_deref(), Some("42"));
}

#[test]
fn caller_params_win_over_the_url_query() {
    let _tracing = TestTracing::init();
    let mut nav = dispatcher();

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    nav.registry_mut()
        .register_middleware(Middleware::new("observe", move |path, params| {
            *sink.borrow_mut() = Some(params.clone());
            (path, params)
        }))
        .unwrap();

    let explicit = ParamMap::new().with("x", "2");
    let _ = nav.handle("app://mall?x=1&y=only-url", &explicit, false);

    let params = seen.borrow().clone().unwrap();
    assert_eq!(params.get::<String>("x").as_deref(), Some("2"));
    assert_eq!(params.get::<String>("y").as_deref(), Some("only-url"));
}

#[test]
fn each_middleware_fully_replaces_path_and_params() {
    let _tracing = TestTracing::init();
    let mut nav = dispatcher();

    nav.registry_mut()
        .register_middleware(Middleware::new("rewrite", |_, _| {
            (
                NavPath::AppRoute("app://rewritten".into()),
                ParamMap::new().with("fresh", true),
            )
        }))
        .unwrap();

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    nav.registry_mut()
        .register_middleware(Middleware::new("observe", move |path, params| {
            *sink.borrow_mut() = Some((path.clone(), params.clone()));
            (path, params)
        }))
        .unwrap();

    let _ = nav.handle("app://original?old=1", &ParamMap::new(), false);

    let (path, params) = seen.borrow().clone().unwrap();
    assert_eq!(path, NavPath::AppRoute("app://rewritten".into()));
    assert!(!params.contains_key("old"));
    assert_eq!(params.get::<bool>("fresh"), Some(true));
}
