//! Callback registration for model events
//!
//! Handlers run on the main thread in registration order. The handler list is
//! cloned before dispatch, so a handler may connect further handlers or cause
//! the same signal to fire again without a `RefCell` double borrow.

use std::cell::RefCell;
use std::rc::Rc;

pub struct Signal<T> {
    handlers: RefCell<Vec<Rc<dyn Fn(&T)>>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> Signal<T> {
    pub fn connect<F>(&self, handler: F)
    where
        F: Fn(&T) + 'static,
    {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    pub fn emit(&self, value: &T) {
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            handler(value);
        }
    }
}
