#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use navlink::{NavPath, NavigationStack, ParamMap, Screen};

/// Minimal host screen; records enough state for assertions.
#[derive(Debug)]
pub struct TestScreen {
    pub name: String,
}

impl TestScreen {
    pub fn boxed(name: impl Into<String>) -> Box<dyn Screen> {
        Box::new(TestScreen { name: name.into() })
    }
}

impl Screen for TestScreen {}

/// Navigation stack that records every transition it receives.
#[derive(Default)]
pub struct RecordingStack {
    /// `(debug rendering of the screen, animated)` per push.
    pub pushed: Vec<(String, bool)>,
    pub presented: Vec<(String, bool)>,
}

impl NavigationStack for RecordingStack {
    fn push(&mut self, screen: Box<dyn Screen>, animated: bool) {
        self.pushed.push((format!("{screen:?}"), animated));
    }

    fn present(&mut self, screen: Box<dyn Screen>, animated: bool) {
        self.presented.push((format!("{screen:?}"), animated));
    }
}

pub fn recording_stack() -> Rc<RefCell<RecordingStack>> {
    Rc::new(RefCell::new(RecordingStack::default()))
}

/// Captures failure-callback invocations: `(original path, original params)`.
pub type FailureLog = Rc<RefCell<Vec<(NavPath, ParamMap)>>>;

pub fn failure_log() -> FailureLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn install_failure_log(dispatcher: &mut navlink::Dispatcher, log: &FailureLog) {
    let log = Rc::clone(log);
    dispatcher
        .registry_mut()
        .set_failure_handler(move |path, params| {
            log.borrow_mut().push((path.clone(), params.clone()));
        });
}
