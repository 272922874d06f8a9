//! Observer callbacks.
//!
//! An [`Observer`] receives the attribute name and the value that was just
//! committed. It is called synchronously from inside the write, once per
//! successful write and once per attribute per `boot`.

use crate::value::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Change-notification callback: `(attribute_name, new_value)`.
pub type Observer = Rc<dyn Fn(&str, &Value)>;

/// Wraps a closure as an [`Observer`].
pub fn observer<F>(f: F) -> Observer
where
    F: Fn(&str, &Value) + 'static,
{
    Rc::new(f)
}

/// Records every notification it receives, in call order.
///
/// Clones share the same log, so one clone can be handed to attributes as an
/// observer while another is kept for inspection.
#[derive(Clone, Default)]
pub struct ChangeLog {
    entries: Rc<RefCell<Vec<(String, Value)>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that appends to this log.
    pub fn observer(&self) -> Observer {
        let entries = Rc::clone(&self.entries);
        observer(move |name, value| {
            entries.borrow_mut().push((name.to_string(), value.clone()));
        })
    }

    pub fn entries(&self) -> Vec<(String, Value)> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drains the log, returning what was recorded so far.
    pub fn take(&self) -> Vec<(String, Value)> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }
}

impl fmt::Debug for ChangeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.borrow().iter()).finish()
    }
}
