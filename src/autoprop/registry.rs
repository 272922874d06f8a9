//! Managed types and their attribute registry.
//!
//! A [`ManagedType`] owns the ordered list of [`AttributeSpec`]s declared for
//! one record type. It is assembled with a [`ManagedTypeBuilder`], one
//! `declare` call per attribute, and frozen by `build()`. Every [`Record`]
//! of the type shares the same `Rc<ManagedType>`.
//!
//! ```ignore
//! let model = ManagedType::builder("Model")
//!     .declare("counter", AttributeOptions::new().default_value(10))?
//!     .declare("weather", AttributeOptions::new().default_value("sunny"))?
//!     .build();
//! ```
//!
//! Attributes are kept in the order they were passed to the builder; `boot`
//! notifies in that order.
//!
//! [`Record`]: crate::record::Record

use crate::error::{AutoPropError, Result};
use crate::spec::{AttributeOptions, AttributeSpec};
use std::rc::Rc;

/// The frozen attribute schema of a record type.
#[derive(Debug)]
pub struct ManagedType {
    name: String,
    attributes: Vec<AttributeSpec>,
}

impl ManagedType {
    /// Start declaring a new type.
    pub fn builder(name: impl Into<String>) -> ManagedTypeBuilder {
        ManagedTypeBuilder {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Build a type from a complete list of specs in one go.
    ///
    /// Same precedence rules as repeated `declare` calls.
    pub fn from_specs<I>(name: impl Into<String>, specs: I) -> Result<Rc<ManagedType>>
    where
        I: IntoIterator<Item = AttributeSpec>,
    {
        let mut builder = Self::builder(name);
        for spec in specs {
            builder = builder.declare_spec(spec)?;
        }
        Ok(builder.build())
    }

    /// Start declaring a type that inherits this type's attributes.
    ///
    /// The new type begins with a copy of this type's specs, in order. This
    /// type is left untouched.
    pub fn extend(&self, name: impl Into<String>) -> ManagedTypeBuilder {
        ManagedTypeBuilder {
            name: name.into(),
            attributes: self.attributes.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    /// All specs in declaration order.
    pub fn specs(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Attribute names in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes whose default value they would themselves reject.
    ///
    /// Such attributes make `boot` fail with `InvalidAssignment`.
    pub fn misconfigured(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|spec| spec.is_misconfigured())
            .map(|spec| spec.name.as_str())
    }
}

/// Incremental builder for a [`ManagedType`].
#[derive(Debug)]
pub struct ManagedTypeBuilder {
    name: String,
    attributes: Vec<AttributeSpec>,
}

impl ManagedTypeBuilder {
    /// Declare a managed attribute and return the builder for chaining.
    ///
    /// Re-declaring a name replaces the earlier spec but keeps its position.
    pub fn declare(self, name: impl Into<String>, options: AttributeOptions) -> Result<Self> {
        self.declare_spec(AttributeSpec::new(name, options))
    }

    /// Declare a prebuilt spec.
    pub fn declare_spec(mut self, spec: AttributeSpec) -> Result<Self> {
        if spec.name.is_empty() {
            return Err(AutoPropError::EmptyAttributeName);
        }

        match self.attributes.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => {
                tracing::debug!(type_name = %self.name, attribute = %spec.name, "Redeclared attribute");
                *existing = spec;
            }
            None => self.attributes.push(spec),
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Freeze the schema.
    pub fn build(self) -> Rc<ManagedType> {
        Rc::new(ManagedType {
            name: self.name,
            attributes: self.attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ChangeLog;
    use crate::value::Value;

    fn names(ty: &ManagedType) -> Vec<&str> {
        ty.attribute_names().collect()
    }

    #[test]
    fn declaration_order_is_preserved() {
        let ty = ManagedType::builder("Model")
            .declare("a", AttributeOptions::default())
            .unwrap()
            .declare("b", AttributeOptions::default())
            .unwrap()
            .declare("c", AttributeOptions::default())
            .unwrap()
            .build();

        assert_eq!(ty.name(), "Model");
        assert_eq!(names(&ty), vec!["a", "b", "c"]);
        assert_eq!(ty.len(), 3);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ManagedType::builder("Model")
            .declare("", AttributeOptions::default())
            .unwrap_err();
        assert!(matches!(err, AutoPropError::EmptyAttributeName));
    }

    #[test]
    fn redeclaration_keeps_first_position_and_latest_options() {
        let log = ChangeLog::new();
        let ty = ManagedType::builder("Model")
            .declare("a", AttributeOptions::new().default_value(1))
            .unwrap()
            .declare("b", AttributeOptions::default())
            .unwrap()
            .declare(
                "a",
                AttributeOptions::new()
                    .default_value(2)
                    .on_change(log.observer()),
            )
            .unwrap()
            .build();

        assert_eq!(names(&ty), vec!["a", "b"]);
        let spec = ty.spec("a").unwrap();
        assert_eq!(spec.default_value, Value::Int(2));
        assert!(spec.on_change.is_some());
    }

    #[test]
    fn from_specs_builds_in_list_order() {
        let ty = ManagedType::from_specs(
            "Model",
            vec![
                AttributeSpec::new("weather", AttributeOptions::new().default_value("sunny")),
                AttributeSpec::new("counter", AttributeOptions::new().default_value(10)),
            ],
        )
        .unwrap();

        assert_eq!(names(&ty), vec!["weather", "counter"]);
    }

    #[test]
    fn extend_copies_parent_without_mutating_it() {
        let parent = ManagedType::builder("Base")
            .declare("a", AttributeOptions::default())
            .unwrap()
            .build();
        let child = parent
            .extend("Derived")
            .declare("b", AttributeOptions::default())
            .unwrap()
            .build();

        assert_eq!(names(&parent), vec!["a"]);
        assert_eq!(names(&child), vec!["a", "b"]);
        assert_eq!(child.name(), "Derived");
    }

    #[test]
    fn extend_can_override_inherited_attribute_in_place() {
        let parent = ManagedType::builder("Base")
            .declare("a", AttributeOptions::new().default_value(1))
            .unwrap()
            .declare("b", AttributeOptions::default())
            .unwrap()
            .build();
        let child = parent
            .extend("Derived")
            .declare("a", AttributeOptions::new().default_value(5))
            .unwrap()
            .build();

        assert_eq!(names(&child), vec!["a", "b"]);
        assert_eq!(child.spec("a").unwrap().default_value, Value::Int(5));
        assert_eq!(parent.spec("a").unwrap().default_value, Value::Int(1));
    }

    #[test]
    fn misconfigured_lists_null_defaults() {
        let ty = ManagedType::builder("Model")
            .declare("ok", AttributeOptions::default())
            .unwrap()
            .declare("bad", AttributeOptions::new().default_value(Value::Null))
            .unwrap()
            .build();

        assert_eq!(ty.misconfigured().collect::<Vec<_>>(), vec!["bad"]);
    }

    #[test]
    fn unknown_spec_is_none() {
        let ty = ManagedType::builder("Empty").build();
        assert!(ty.spec("missing").is_none());
        assert!(ty.is_empty());
    }
}
