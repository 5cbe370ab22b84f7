//! Dynamically typed configuration values.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::{Config, Pattern};

/// A configuration value as loaded from JSON, YAML or set by the host.
///
/// Accessors are lenient: asking for the wrong shape gives the caller's
/// default instead of an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `false` only for [`Value::Null`].
    pub fn exists(&self) -> bool {
        !matches!(self, Value::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integers as-is, floats truncated toward zero (saturating).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    /// Floats as-is, integers widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer nanoseconds; negative values clamp to zero.
    pub fn as_duration(&self) -> Option<Duration> {
        self.as_int().map(nanos_to_duration)
    }

    pub fn string(&self) -> String {
        self.string_or("")
    }

    pub fn string_or(&self, default: &str) -> String {
        self.as_str().unwrap_or(default).to_string()
    }

    pub fn bool(&self) -> bool {
        self.bool_or(false)
    }

    pub fn bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    pub fn int(&self) -> i64 {
        self.int_or(0)
    }

    pub fn int_or(&self, default: i64) -> i64 {
        self.as_int().unwrap_or(default)
    }

    pub fn float(&self) -> f64 {
        self.float_or(0.0)
    }

    pub fn float_or(&self, default: f64) -> f64 {
        self.as_float().unwrap_or(default)
    }

    pub fn duration(&self) -> Duration {
        self.duration_or(Duration::ZERO)
    }

    pub fn duration_or(&self, default: Duration) -> Duration {
        self.as_duration().unwrap_or(default)
    }

    /// A copy of the entries of a map value, empty for anything else.
    pub fn map(&self) -> BTreeMap<String, Value> {
        match self {
            Value::Map(map) => map.clone(),
            _ => BTreeMap::new(),
        }
    }

    /// A copy of the elements of a list value, empty for anything else.
    pub fn list(&self) -> Vec<Value> {
        match self {
            Value::List(list) => list.clone(),
            _ => Vec::new(),
        }
    }

    /// A detached [`Config`] built from a map value.
    pub fn config(&self) -> Config {
        Config::from_map(self.map())
    }

    /// Uses the string value as a pattern source.
    pub fn pattern(&self) -> Pattern {
        Pattern::new(self.string())
    }

    /// The string value, if it exists and matches the regex `pattern`.
    pub fn string_and(&self, pattern: &str) -> Option<String> {
        if !self.exists() {
            return None;
        }
        let s = self.string();
        Pattern::new(pattern).validate_string(&s).then_some(s)
    }

    pub fn string_and_or(&self, pattern: &str, default: &str) -> String {
        self.string_and(pattern)
            .unwrap_or_else(|| default.to_string())
    }

    /// The integer value, if it exists and satisfies the condition `pattern`.
    pub fn int_and(&self, pattern: &str) -> Option<i64> {
        if !self.exists() {
            return None;
        }
        let n = self.int();
        Pattern::new(pattern).validate_int(n).then_some(n)
    }

    pub fn int_and_or(&self, pattern: &str, default: i64) -> i64 {
        self.int_and(pattern).unwrap_or(default)
    }

    pub fn float_and(&self, pattern: &str) -> Option<f64> {
        if !self.exists() {
            return None;
        }
        let n = self.float();
        Pattern::new(pattern).validate_float(n).then_some(n)
    }

    pub fn float_and_or(&self, pattern: &str, default: f64) -> f64 {
        self.float_and(pattern).unwrap_or(default)
    }

    /// The condition sees the raw nanosecond count.
    pub fn duration_and(&self, pattern: &str) -> Option<Duration> {
        self.int_and(pattern).map(nanos_to_duration)
    }

    pub fn duration_and_or(&self, pattern: &str, default: Duration) -> Duration {
        self.duration_and(pattern).unwrap_or(default)
    }
}

pub(crate) fn nanos_to_duration(nanos: i64) -> Duration {
    Duration::from_nanos(nanos.max(0) as u64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Int(i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<Config> for Value {
    fn from(config: Config) -> Self {
        Value::Map(config.kv().clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (yaml_key(key), Value::from(value)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

/// YAML allows any value as a mapping key; config keys are always strings.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        other => Value::from(other).to_string(),
    }
}
