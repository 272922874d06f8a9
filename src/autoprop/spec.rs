//! Attribute specifications.
//!
//! An [`AttributeSpec`] is the schema of one managed attribute: its name,
//! where its value is stored, which accessors exist, whether it accepts null,
//! what it reads as before the first write, and who to notify on change.

use crate::observer::Observer;
use crate::value::Value;
use std::fmt;

/// Prefix that turns an attribute name into its storage key.
const STORAGE_PREFIX: char = '_';

/// Options accepted when declaring a managed attribute.
///
/// `AttributeOptions::default()` gives a readable, writable, non-null
/// attribute defaulting to `0` with no observer.
#[derive(Clone)]
pub struct AttributeOptions {
    pub readable: bool,
    pub writable: bool,
    pub allow_null: bool,
    pub default_value: Value,
    pub on_change: Option<Observer>,
}

impl Default for AttributeOptions {
    fn default() -> Self {
        Self {
            readable: true,
            writable: true,
            allow_null: false,
            default_value: Value::Int(0),
            on_change: None,
        }
    }
}

impl AttributeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value reported before the first write.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Permit clearing the attribute to null.
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Drop the read accessor.
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Drop the write accessor.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Attach the change observer.
    pub fn on_change(mut self, observer: Observer) -> Self {
        self.on_change = Some(observer);
        self
    }
}

/// Specification for a single managed attribute.
#[derive(Clone)]
pub struct AttributeSpec {
    pub name: String,

    /// Key of the instance slot holding the value. Slots are kept apart from
    /// attribute names, so this never shadows a user-visible name.
    pub storage_key: String,

    pub readable: bool,
    pub writable: bool,
    pub allow_null: bool,
    pub default_value: Value,
    pub on_change: Option<Observer>,
}

impl AttributeSpec {
    pub fn new(name: impl Into<String>, options: AttributeOptions) -> Self {
        let name = name.into();
        Self {
            storage_key: format!("{}{}", STORAGE_PREFIX, name),
            name,
            readable: options.readable,
            writable: options.writable,
            allow_null: options.allow_null,
            default_value: options.default_value,
            on_change: options.on_change,
        }
    }

    /// Whether `value` may be stored in this attribute.
    pub fn accepts(&self, value: &Value) -> bool {
        self.allow_null || !value.is_null()
    }

    /// A null default on a non-null attribute cannot survive `boot`.
    pub fn is_misconfigured(&self) -> bool {
        !self.accepts(&self.default_value)
    }

    pub(crate) fn notify(&self, value: &Value) {
        if let Some(observer) = &self.on_change {
            observer(&self.name, value);
        }
    }
}

impl fmt::Debug for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("name", &self.name)
            .field("storage_key", &self.storage_key)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("allow_null", &self.allow_null)
            .field("default_value", &self.default_value)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ChangeLog;

    #[test]
    fn default_options_match_declared_defaults() {
        let spec = AttributeSpec::new("counter", AttributeOptions::default());
        assert!(spec.readable);
        assert!(spec.writable);
        assert!(!spec.allow_null);
        assert_eq!(spec.default_value, Value::Int(0));
        assert!(spec.on_change.is_none());
    }

    #[test]
    fn storage_key_is_prefixed_name() {
        let spec = AttributeSpec::new("weather", AttributeOptions::default());
        assert_eq!(spec.storage_key, "_weather");
    }

    #[test]
    fn builder_methods_set_flags() {
        let spec = AttributeSpec::new(
            "note",
            AttributeOptions::new()
                .default_value("n/a")
                .allow_null()
                .read_only(),
        );
        assert!(spec.readable);
        assert!(!spec.writable);
        assert!(spec.allow_null);
        assert_eq!(spec.default_value, Value::from("n/a"));

        let spec = AttributeSpec::new("secret", AttributeOptions::new().write_only());
        assert!(!spec.readable);
        assert!(spec.writable);
    }

    #[test]
    fn accepts_null_only_when_allowed() {
        let strict = AttributeSpec::new("a", AttributeOptions::default());
        let lax = AttributeSpec::new("b", AttributeOptions::new().allow_null());
        assert!(!strict.accepts(&Value::Null));
        assert!(strict.accepts(&Value::Int(1)));
        assert!(lax.accepts(&Value::Null));
    }

    #[test]
    fn null_default_without_allow_null_is_misconfigured() {
        let bad = AttributeSpec::new("a", AttributeOptions::new().default_value(Value::Null));
        let ok = AttributeSpec::new(
            "b",
            AttributeOptions::new().default_value(Value::Null).allow_null(),
        );
        assert!(bad.is_misconfigured());
        assert!(!ok.is_misconfigured());
    }

    #[test]
    fn notify_passes_name_and_value() {
        let log = ChangeLog::new();
        let spec = AttributeSpec::new("total", AttributeOptions::new().on_change(log.observer()));
        spec.notify(&Value::Int(1));
        assert_eq!(log.entries(), vec![("total".to_string(), Value::Int(1))]);
    }
}
