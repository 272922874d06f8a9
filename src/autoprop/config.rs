use crate::error::{AutoPropError, Result};
use crate::observer::Observer;
use crate::registry::ManagedType;
use crate::spec::{AttributeOptions, AttributeSpec};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::rc::Rc;

pub const CONFIG_FILENAME: &str = "model.json";
const DEFAULT_TYPE_NAME: &str = "Model";

/// A managed type declared in a JSON file.
///
/// Observers cannot be serialized; they are attached by name in
/// [`TypeConfig::build_with`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeConfig {
    #[serde(default = "default_type_name")]
    pub name: String,

    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: Vec<AttributeConfig>,
}

/// One attribute entry of a [`TypeConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeConfig {
    pub name: String,

    #[serde(default = "default_true")]
    pub readable: bool,

    #[serde(default = "default_true")]
    pub writable: bool,

    #[serde(default)]
    pub allow_null: bool,

    #[serde(default = "default_value")]
    pub default_value: Value,
}

fn default_type_name() -> String {
    DEFAULT_TYPE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_value() -> Value {
    Value::Int(0)
}

impl AttributeConfig {
    pub fn new(name: impl Into<String>, default_value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            readable: true,
            writable: true,
            allow_null: false,
            default_value: default_value.into(),
        }
    }

    fn options(&self) -> AttributeOptions {
        AttributeOptions {
            readable: self.readable,
            writable: self.writable,
            allow_null: self.allow_null,
            default_value: self.default_value.clone(),
            on_change: None,
        }
    }
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            name: default_type_name(),
            attributes: Vec::new(),
        }
    }
}

impl TypeConfig {
    /// Load a type declaration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(AutoPropError::Io)?;
        let config: TypeConfig =
            serde_json::from_str(&content).map_err(AutoPropError::Serialization)?;
        if config.attributes.is_empty() {
            return Err(AutoPropError::Config(format!(
                "{} declares no attributes",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise return `None`.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Save as pretty JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(AutoPropError::Io)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(AutoPropError::Serialization)?;
        fs::write(path, content).map_err(AutoPropError::Io)?;
        Ok(())
    }

    /// Build the managed type, asking `observer_for` for each attribute's
    /// observer.
    ///
    /// A repeated name keeps its first position and its last entry's
    /// settings, and `observer_for` is asked once per distinct name.
    pub fn build_with<F>(&self, mut observer_for: F) -> Result<Rc<ManagedType>>
    where
        F: FnMut(&str) -> Option<Observer>,
    {
        let mut merged: Vec<&AttributeConfig> = Vec::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            match merged.iter_mut().find(|seen| seen.name == attr.name) {
                Some(seen) => *seen = attr,
                None => merged.push(attr),
            }
        }

        let specs = merged.into_iter().map(|attr| {
            let mut options = attr.options();
            options.on_change = observer_for(&attr.name);
            AttributeSpec::new(attr.name.clone(), options)
        });
        ManagedType::from_specs(self.name.clone(), specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::ChangeLog;
    use crate::record::Record;

    #[test]
    fn missing_fields_take_defaults() {
        let config: TypeConfig =
            serde_json::from_str(r#"{"attributes": [{"name": "counter"}]}"#).unwrap();

        assert_eq!(config.name, "Model");
        let attr = &config.attributes[0];
        assert!(attr.readable);
        assert!(attr.writable);
        assert!(!attr.allow_null);
        assert_eq!(attr.default_value, Value::Int(0));
    }

    #[test]
    fn explicit_fields_are_kept() {
        let config: TypeConfig = serde_json::from_str(
            r#"{
                "name": "Weather",
                "attributes": [
                    {"name": "sky", "default_value": "sunny", "allow_null": true, "writable": false}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.name, "Weather");
        let attr = &config.attributes[0];
        assert_eq!(attr.default_value, Value::from("sunny"));
        assert!(attr.allow_null);
        assert!(!attr.writable);
    }

    #[test]
    fn save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILENAME);

        let config = TypeConfig {
            name: "Model".to_string(),
            attributes: vec![
                AttributeConfig::new("counter", 100),
                AttributeConfig::new("weather", "sunny"),
            ],
        };
        config.save(&path).unwrap();

        let loaded = TypeConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_optional_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = TypeConfig::load_optional(temp_dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_rejects_empty_attribute_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{"name": "Empty"}"#).unwrap();

        let err = TypeConfig::load(&path).unwrap_err();
        assert!(matches!(err, AutoPropError::Config(_)));
    }

    #[test]
    fn load_reports_bad_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "{ not json").unwrap();

        let err = TypeConfig::load(&path).unwrap_err();
        assert!(matches!(err, AutoPropError::Serialization(_)));
    }

    #[test]
    fn build_with_attaches_observers_by_name() {
        let log = ChangeLog::new();
        let config = TypeConfig {
            name: "Model".to_string(),
            attributes: vec![
                AttributeConfig::new("counter", 10),
                AttributeConfig::new("weather", "sunny"),
            ],
        };

        let ty = config
            .build_with(|name| (name == "weather").then(|| log.observer()))
            .unwrap();
        let names: Vec<_> = ty.attribute_names().collect();
        assert_eq!(names, vec!["counter", "weather"]);

        Record::new(ty).boot().unwrap();
        assert_eq!(
            log.entries(),
            vec![("weather".to_string(), Value::from("sunny"))]
        );
    }

    #[test]
    fn build_with_rejects_empty_name() {
        let config = TypeConfig {
            name: "Model".to_string(),
            attributes: vec![AttributeConfig::new("", 0)],
        };
        assert!(matches!(
            config.build_with(|_| None),
            Err(AutoPropError::EmptyAttributeName)
        ));
    }

    #[test]
    fn build_with_asks_once_per_repeated_name() {
        let config = TypeConfig {
            name: "Model".to_string(),
            attributes: vec![
                AttributeConfig::new("counter", 1),
                AttributeConfig::new("weather", "sunny"),
                AttributeConfig::new("counter", 2),
            ],
        };

        let mut asked = Vec::new();
        let ty = config
            .build_with(|name| {
                asked.push(name.to_string());
                None
            })
            .unwrap();

        assert_eq!(asked, vec!["counter", "weather"]);
        assert_eq!(ty.attribute_names().collect::<Vec<_>>(), vec!["counter", "weather"]);
        assert_eq!(ty.spec("counter").unwrap().default_value, Value::Int(2));
    }
}
