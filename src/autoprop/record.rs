//! Record instances.
//!
//! A [`Record`] is one instance of a [`ManagedType`]. It owns a storage slot
//! per attribute, created lazily on first write. Reads of an unset slot fall
//! back to the attribute's default value.
//!
//! Writes follow a fixed sequence: validate, commit, notify. The observer runs
//! after the slot borrow is released, so it may read or write this record (or
//! any other) from inside the callback. There is no cycle guard: two observers
//! that write each other's attributes recurse until the stack runs out.

use crate::error::{AutoPropError, Result};
use crate::registry::ManagedType;
use crate::spec::AttributeSpec;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Record {
    ty: Rc<ManagedType>,
    slots: RefCell<HashMap<String, Value>>,
}

impl Record {
    /// A fresh instance with no slots set. No observers fire.
    pub fn new(ty: Rc<ManagedType>) -> Self {
        Self {
            ty,
            slots: RefCell::new(HashMap::new()),
        }
    }

    pub fn managed_type(&self) -> &Rc<ManagedType> {
        &self.ty
    }

    /// Read an attribute, falling back to its default when never written.
    pub fn get(&self, name: &str) -> Result<Value> {
        let spec = self.lookup(name)?;
        if !spec.readable {
            return Err(AutoPropError::NotReadable(name.to_string()));
        }
        Ok(self.effective(spec))
    }

    /// Write an attribute and notify its observer.
    ///
    /// Nothing is stored when the write is rejected.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let spec = self.lookup(name)?;
        if !spec.writable {
            return Err(AutoPropError::NotWritable(name.to_string()));
        }
        self.assign(spec, value.into())
    }

    /// Read-modify-write through the public accessors.
    ///
    /// Returns the value that was written.
    pub fn update<F>(&self, name: &str, f: F) -> Result<Value>
    where
        F: FnOnce(Value) -> Value,
    {
        let next = f(self.get(name)?);
        self.set(name, next.clone())?;
        Ok(next)
    }

    /// Re-write every attribute with its current effective value.
    ///
    /// Fires every observer once, in declaration order, whether or not
    /// anything changed. Stops at the first rejected write; observers that
    /// already ran are not undone.
    ///
    /// Bypasses the `readable`/`writable` flags, so read-only and write-only
    /// attributes are re-notified too.
    pub fn boot(&self) -> Result<()> {
        tracing::debug!(type_name = %self.ty.name(), attributes = self.ty.len(), "Booting record");
        for spec in self.ty.specs() {
            let current = self.effective(spec);
            self.assign(spec, current)?;
        }
        Ok(())
    }

    /// Whether the attribute's slot has been written.
    pub fn is_set(&self, name: &str) -> bool {
        self.ty
            .spec(name)
            .is_some_and(|spec| self.slots.borrow().contains_key(&spec.storage_key))
    }

    /// Effective values of all attributes in declaration order.
    ///
    /// Ignores the readable flag and fires no observers.
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        self.ty
            .specs()
            .iter()
            .map(|spec| (spec.name.clone(), self.effective(spec)))
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<&AttributeSpec> {
        self.ty
            .spec(name)
            .ok_or_else(|| AutoPropError::UnknownAttribute(name.to_string()))
    }

    fn effective(&self, spec: &AttributeSpec) -> Value {
        self.slots
            .borrow()
            .get(&spec.storage_key)
            .cloned()
            .unwrap_or_else(|| spec.default_value.clone())
    }

    fn assign(&self, spec: &AttributeSpec, value: Value) -> Result<()> {
        if !spec.accepts(&value) {
            return Err(AutoPropError::InvalidAssignment {
                name: spec.name.clone(),
            });
        }

        tracing::trace!(attribute = %spec.name, value = %value, "Assigning attribute");
        self.slots
            .borrow_mut()
            .insert(spec.storage_key.clone(), value.clone());
        spec.notify(&value);
        Ok(())
    }
}
