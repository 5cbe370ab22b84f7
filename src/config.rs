//! Layered configuration store.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::value::nanos_to_duration;
use crate::{ConfigError, Environment, Format, Pattern, ProcessEnvironment, Value};

/// A string-keyed map of [`Value`]s with flag and environment overlays.
///
/// The scalar getters (`string`, `bool`, `int`, `float`, `duration` and
/// their variants) look a name up in this order:
///
/// 1. a flag, unless it holds its type's zero value (`""`, `false`, `0`);
/// 2. a non-empty environment variable of the same name. Any non-empty
///    value reads as `true`, and numbers are used only if they parse;
/// 3. the key-value map, coerced as [`Value`] does;
/// 4. the caller's default.
///
/// Everything else (`raw`, `value`, `sub`, `kv`) sees only the map.
///
/// ```
/// use condcfg::{Config, MapEnvironment};
///
/// let config = Config::from_yaml("port: 8080\nratio: 0.5\n")
///     .unwrap()
///     .with_environment(MapEnvironment::new().with("port", "9090"));
/// assert_eq!(config.int("port"), 9090);
/// assert_eq!(config.float_and("ratio", "N>0&&N<1"), Some(0.5));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    flags: BTreeMap<String, Value>,
    kv: BTreeMap<String, Value>,
    env: Arc<dyn Environment>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// An empty config reading the process environment.
    pub fn new() -> Self {
        Self::from_map(BTreeMap::new())
    }

    pub fn from_map(kv: BTreeMap<String, Value>) -> Self {
        Self {
            flags: BTreeMap::new(),
            kv,
            env: Arc::new(ProcessEnvironment),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.merge_json(text)?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.merge_yaml(text)?;
        Ok(config)
    }

    /// Loads a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Replaces the flag overlay.
    pub fn with_flags<K, V>(mut self, flags: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.flags = flags
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.flags.insert(name.into(), value.into());
    }

    /// Replaces the environment consulted for overrides.
    pub fn with_environment(mut self, env: impl Environment + 'static) -> Self {
        self.env = Arc::new(env);
        self
    }

    pub fn merge_json(&mut self, text: &str) -> Result<(), ConfigError> {
        self.merge_document(Format::Json, text)
    }

    pub fn merge_yaml(&mut self, text: &str) -> Result<(), ConfigError> {
        self.merge_document(Format::Yaml, text)
    }

    /// Merges a file; the format is picked from its extension.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?format, "loading config file");
        self.merge_document(format, &text)
    }

    /// Copies every top-level entry of `other`, replacing existing ones.
    pub fn merge(&mut self, other: &Config) {
        self.extend(other.kv.clone());
    }

    fn merge_document(&mut self, format: Format, text: &str) -> Result<(), ConfigError> {
        let data = format.parse(text)?;
        tracing::debug!(?format, keys = data.len(), "merging config");
        self.extend(data);
        Ok(())
    }

    fn extend(&mut self, data: BTreeMap<String, Value>) {
        // Top-level keys replace, nested maps are not merged.
        self.kv.extend(data);
    }

    /// The key-value map, without flags or environment.
    pub fn kv(&self) -> &BTreeMap<String, Value> {
        &self.kv
    }

    pub fn has(&self, name: &str) -> bool {
        self.flags.contains_key(name) || self.env_var(name).is_some() || self.kv.contains_key(name)
    }

    pub fn must(&self, name: &str) -> Result<(), ConfigError> {
        if self.has(name) {
            Ok(())
        } else {
            Err(ConfigError::Missing {
                name: name.to_string(),
            })
        }
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.kv.get(name)
    }

    /// A copy of the map entry, [`Value::Null`] when absent.
    pub fn value(&self, name: &str) -> Value {
        self.raw(name).cloned().unwrap_or_default()
    }

    /// The map entry `name` as a config of its own, sharing this config's
    /// environment but not its flags. Empty if the entry is not a map.
    pub fn sub(&self, name: &str) -> Config {
        Config {
            flags: BTreeMap::new(),
            kv: self.raw(name).map(Value::map).unwrap_or_default(),
            env: Arc::clone(&self.env),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.kv.insert(name.into(), value.into());
    }

    /// Sets `name` only if the map has no entry for it yet.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.kv.entry(name.into()).or_insert_with(|| value.into());
    }

    /// A pattern whose source is the string value of `name`.
    pub fn pattern(&self, name: &str) -> Pattern {
        Pattern::new(self.string(name))
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.var(name).filter(|v| !v.is_empty())
    }

    /// The layered lookup without a default: `None` when no layer holds a
    /// string for `name`.
    pub fn string_opt(&self, name: &str) -> Option<String> {
        if let Some(Value::String(s)) = self.flags.get(name) {
            if !s.is_empty() {
                return Some(s.clone());
            }
        }
        if let Some(env) = self.env_var(name) {
            return Some(env);
        }
        self.kv.get(name)?.as_str().map(str::to_string)
    }

    pub fn bool_opt(&self, name: &str) -> Option<bool> {
        if let Some(Value::Bool(true)) = self.flags.get(name) {
            return Some(true);
        }
        if self.env_var(name).is_some() {
            return Some(true);
        }
        self.kv.get(name)?.as_bool()
    }

    pub fn int_opt(&self, name: &str) -> Option<i64> {
        if let Some(n) = self.flags.get(name).and_then(Value::as_int) {
            if n != 0 {
                return Some(n);
            }
        }
        if let Some(n) = self.env_var(name).and_then(|env| env.parse().ok()) {
            return Some(n);
        }
        self.kv.get(name)?.as_int()
    }

    /// `None` when no layer holds a number for `name`, so callers can tell a
    /// missing or non-numeric entry from `0.0`.
    pub fn float_opt(&self, name: &str) -> Option<f64> {
        if let Some(n) = self.flags.get(name).and_then(Value::as_float) {
            if n != 0.0 {
                return Some(n);
            }
        }
        if let Some(n) = self.env_var(name).and_then(|env| env.parse().ok()) {
            return Some(n);
        }
        self.kv.get(name)?.as_float()
    }

    pub fn string(&self, name: &str) -> String {
        self.string_or(name, "")
    }

    pub fn string_or(&self, name: &str, default: &str) -> String {
        self.string_opt(name)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn string_and(&self, name: &str, pattern: &str) -> Option<String> {
        if !self.has(name) {
            return None;
        }
        let s = self.string(name);
        Pattern::new(pattern).validate_string(&s).then_some(s)
    }

    pub fn string_and_or(&self, name: &str, pattern: &str, default: &str) -> String {
        self.string_and(name, pattern)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn bool(&self, name: &str) -> bool {
        self.bool_or(name, false)
    }

    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        self.bool_opt(name).unwrap_or(default)
    }

    pub fn int(&self, name: &str) -> i64 {
        self.int_or(name, 0)
    }

    pub fn int_or(&self, name: &str, default: i64) -> i64 {
        self.int_opt(name).unwrap_or(default)
    }

    pub fn int_and(&self, name: &str, pattern: &str) -> Option<i64> {
        if !self.has(name) {
            return None;
        }
        let n = self.int(name);
        Pattern::new(pattern).validate_int(n).then_some(n)
    }

    pub fn int_and_or(&self, name: &str, pattern: &str, default: i64) -> i64 {
        self.int_and(name, pattern).unwrap_or(default)
    }

    pub fn float(&self, name: &str) -> f64 {
        self.float_or(name, 0.0)
    }

    pub fn float_or(&self, name: &str, default: f64) -> f64 {
        self.float_opt(name).unwrap_or(default)
    }

    pub fn float_and(&self, name: &str, pattern: &str) -> Option<f64> {
        if !self.has(name) {
            return None;
        }
        let n = self.float(name);
        Pattern::new(pattern).validate_float(n).then_some(n)
    }

    pub fn float_and_or(&self, name: &str, pattern: &str, default: f64) -> f64 {
        self.float_and(name, pattern).unwrap_or(default)
    }

    /// Integer nanoseconds, looked up like [`Config::int`].
    pub fn duration(&self, name: &str) -> Duration {
        self.duration_or(name, Duration::ZERO)
    }

    pub fn duration_or(&self, name: &str, default: Duration) -> Duration {
        self.int_opt(name)
            .map(nanos_to_duration)
            .unwrap_or(default)
    }

    /// The condition sees the raw nanosecond count.
    pub fn duration_and(&self, name: &str, pattern: &str) -> Option<Duration> {
        self.int_and(name, pattern).map(nanos_to_duration)
    }

    pub fn duration_and_or(&self, name: &str, pattern: &str, default: Duration) -> Duration {
        self.duration_and(name, pattern).unwrap_or(default)
    }
}

impl From<BTreeMap<String, Value>> for Config {
    fn from(kv: BTreeMap<String, Value>) -> Self {
        Config::from_map(kv)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Config::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
