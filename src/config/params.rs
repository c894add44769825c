//! Typed user parameters.
//!
//! Extensions register the parameters they read with a [`ParamRegistry`] and
//! keep the returned [`ParamHandle`]s. Each build carries a [`UserInput`]
//! holding the raw values the user supplied; steps resolve them through the
//! handles, falling back to an explicit default when a value is unset.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Errors raised while registering parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Parameter name '{0}' does not produce a usable id")]
    EmptyName(String),

    #[error("Parameter '{id}' is already registered")]
    DuplicateParam { id: String },

    #[error("Parameter '{name}' has invalid default '{value}' (expected {expected})")]
    InvalidDefault {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("Parameter '{name}' has invalid ignore value '{value}' (expected {expected})")]
    InvalidIgnoreIf {
        name: String,
        value: String,
        expected: &'static str,
    },
}

/// A value type a parameter can hold.
pub trait ParamType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    /// Parse the textual form used for defaults.
    fn parse(raw: &str) -> Option<Self>;

    /// Read a value supplied by the user.
    fn from_value(value: &Value) -> Option<Self>;

    fn to_value(&self) -> Value;
}

impl ParamType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ParamType for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

/// Registration metadata for a parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    /// Default in textual form, parsed by the parameter's type.
    pub default: String,
    pub group: Option<String>,
    pub order_priority: f64,
    /// A supplied value equal to this is treated as unset.
    pub ignore_if: Option<String>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            default: default.into(),
            group: None,
            order_priority: 10.0,
            ignore_if: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn order_priority(mut self, priority: f64) -> Self {
        self.order_priority = priority;
        self
    }

    pub fn ignore_if(mut self, value: impl Into<String>) -> Self {
        self.ignore_if = Some(value.into());
        self
    }
}

/// A parameter as stored in the registry.
#[derive(Debug, Clone)]
pub struct RegisteredParam {
    pub id: String,
    pub type_name: &'static str,
    pub spec: ParamSpec,
}

/// Typed key for reading a parameter from [`UserInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamHandle<T: ParamType> {
    id: String,
    default: T,
    ignore_if: Option<T>,
}

impl<T: ParamType> ParamHandle<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The registered default.
    pub fn default_value(&self) -> &T {
        &self.default
    }
}

/// Lowercase alphanumeric id derived from a display name.
pub fn clean_param_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Default)]
pub struct ParamRegistry {
    params: Vec<RegisteredParam>,
}

impl ParamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: ParamType>(&mut self, spec: ParamSpec) -> Result<ParamHandle<T>, ParamError> {
        let id = clean_param_id(&spec.name);
        if id.is_empty() {
            return Err(ParamError::EmptyName(spec.name));
        }
        if self.get(&id).is_some() {
            return Err(ParamError::DuplicateParam { id });
        }

        let default = T::parse(&spec.default).ok_or_else(|| ParamError::InvalidDefault {
            name: spec.name.clone(),
            value: spec.default.clone(),
            expected: T::TYPE_NAME,
        })?;
        let ignore_if = match &spec.ignore_if {
            Some(raw) => Some(T::parse(raw).ok_or_else(|| ParamError::InvalidIgnoreIf {
                name: spec.name.clone(),
                value: raw.clone(),
                expected: T::TYPE_NAME,
            })?),
            None => None,
        };

        tracing::debug!("Registered parameter '{}' ({})", id, T::TYPE_NAME);
        self.params.push(RegisteredParam {
            id: id.clone(),
            type_name: T::TYPE_NAME,
            spec,
        });

        Ok(ParamHandle {
            id,
            default,
            ignore_if,
        })
    }

    pub fn get(&self, id: &str) -> Option<&RegisteredParam> {
        self.params.iter().find(|param| param.id == id)
    }

    /// Registered parameters in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredParam> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Raw parameter values for a single build, keyed by parameter id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInput {
    values: BTreeMap<String, Value>,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: ParamType>(&mut self, handle: &ParamHandle<T>, value: T) {
        self.values.insert(handle.id.clone(), value.to_value());
    }

    /// Set a value by id or display name.
    pub fn set_raw(&mut self, name: &str, value: Value) {
        self.values.insert(clean_param_id(name), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(&clean_param_id(name))
    }

    /// Typed value, or `default` when unset, ignored, or of the wrong type.
    pub fn get<T: ParamType>(&self, handle: &ParamHandle<T>, default: T) -> T {
        self.get_opt(handle).unwrap_or(default)
    }

    /// Typed value, or the registered default.
    pub fn get_or_default<T: ParamType>(&self, handle: &ParamHandle<T>) -> T {
        self.get(handle, handle.default.clone())
    }

    pub fn get_opt<T: ParamType>(&self, handle: &ParamHandle<T>) -> Option<T> {
        let raw = self.values.get(&handle.id)?;
        let Some(value) = T::from_value(raw) else {
            tracing::warn!(
                "Ignoring value {} for parameter '{}': expected {}",
                raw,
                handle.id,
                T::TYPE_NAME
            );
            return None;
        };
        if handle.ignore_if.as_ref() == Some(&value) {
            return None;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_param_id() {
        assert_eq!(clean_param_id("Save First Frame"), "savefirstframe");
        assert_eq!(clean_param_id("  --  "), "");
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ParamRegistry::new();
        registry.register::<bool>(ParamSpec::new("Save First Frame", "false")).unwrap();
        let err = registry
            .register::<bool>(ParamSpec::new("save first-frame", "true"))
            .unwrap_err();
        assert_eq!(err, ParamError::DuplicateParam { id: "savefirstframe".into() });
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_rejects_bad_default() {
        let mut registry = ParamRegistry::new();
        let err = registry.register::<i64>(ParamSpec::new("Start", "soon")).unwrap_err();
        assert!(matches!(err, ParamError::InvalidDefault { expected: "integer", .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let mut registry = ParamRegistry::new();
        let err = registry.register::<bool>(ParamSpec::new("!!", "false")).unwrap_err();
        assert_eq!(err, ParamError::EmptyName("!!".into()));
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let mut registry = ParamRegistry::new();
        let handle = registry.register::<i64>(ParamSpec::new("Range End", "-1")).unwrap();
        let mut input = UserInput::new();

        assert_eq!(input.get(&handle, 7), 7);
        assert_eq!(input.get_or_default(&handle), -1);

        input.set(&handle, 12);
        assert_eq!(input.get(&handle, 7), 12);

        input.set_raw("Range End", json!("not a number"));
        assert_eq!(input.get(&handle, 7), 7);
    }

    #[test]
    fn test_string_values_are_parsed() {
        let mut registry = ParamRegistry::new();
        let flag = registry.register::<bool>(ParamSpec::new("Flag", "false")).unwrap();
        let count = registry.register::<i64>(ParamSpec::new("Count", "0")).unwrap();
        let mut input = UserInput::new();
        input.set_raw("flag", json!("TRUE"));
        input.set_raw("count", json!(" 4 "));

        assert!(input.get(&flag, false));
        assert_eq!(input.get(&count, 0), 4);
    }

    #[test]
    fn test_ignore_if_treats_value_as_unset() {
        let mut registry = ParamRegistry::new();
        let handle = registry
            .register::<bool>(ParamSpec::new("Save Last Frame", "false").ignore_if("false"))
            .unwrap();
        let mut input = UserInput::new();
        input.set(&handle, false);
        assert_eq!(input.get_opt(&handle), None);

        input.set(&handle, true);
        assert_eq!(input.get_opt(&handle), Some(true));
    }

    #[test]
    fn test_user_input_from_json() {
        let input: UserInput =
            serde_json::from_value(json!({ "savefirstframe": true, "framerangestart": 3 })).unwrap();
        let mut registry = ParamRegistry::new();
        let first = registry.register::<bool>(ParamSpec::new("Save First Frame", "false")).unwrap();
        let start = registry.register::<i64>(ParamSpec::new("Frame Range Start", "-1")).unwrap();
        let end = registry.register::<i64>(ParamSpec::new("Frame Range End", "-1")).unwrap();

        assert!(input.get(&first, false));
        assert_eq!(start.id(), "framerangestart");
        assert_eq!(input.get_or_default(&start), 3);
        assert_eq!(input.get_or_default(&end), -1);
    }
}
