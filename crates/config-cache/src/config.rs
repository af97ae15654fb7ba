//! Typed configuration mapping with dotted-path access
//!
//! A [`Config`] maps string keys to [`Value`]s. Nested mappings are reached
//! with dot-separated paths:
//!
//! ```
//! use config_cache::Config;
//! use serde_json::json;
//!
//! let config = Config::try_from(json!({"server": {"port": 8080, "debug": "on"}})).unwrap();
//! assert_eq!(config.get_int("server.port", 80), 8080);
//! assert_eq!(config.get_int("server.timeout", 30), 30);
//! assert!(config.get_boolean("server.debug", false));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{LazyLock, PoisonError, RwLock};

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::value::{self, Scalar, Value};

/// Separator between path segments.
pub const SEPARATOR: char = '.';

const DEFAULT_BOOLEAN_LITERALS: [(&str, bool); 6] = [
    ("yes", true),
    ("true", true),
    ("on", true),
    ("no", false),
    ("false", false),
    ("off", false),
];

/// Process-wide table of boolean literal tokens, keyed in lowercase.
static BOOLEAN_LITERALS: LazyLock<RwLock<HashMap<String, bool>>> = LazyLock::new(|| {
    RwLock::new(
        DEFAULT_BOOLEAN_LITERALS
            .iter()
            .map(|(token, state)| (token.to_string(), *state))
            .collect(),
    )
});

fn boolean_literal(token: &str) -> Option<bool> {
    BOOLEAN_LITERALS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&token.to_lowercase())
        .copied()
}

/// Configuration mapping loaded from a single file.
///
/// Non-leaf nodes are always mappings; sequences only appear as leaves.
/// Keys are kept in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    entries: BTreeMap<String, Value>,
}

impl Config {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra pair of boolean literals for every `Config`.
    ///
    /// Tokens are matched case-insensitively.
    pub fn add_bool_literals(true_literal: &str, false_literal: &str) {
        let mut table = BOOLEAN_LITERALS
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        table.insert(true_literal.to_lowercase(), true);
        table.insert(false_literal.to_lowercase(), false);
    }

    /// Resolve a dotted path.
    ///
    /// Fails with [`Error::NotFound`] when a segment is absent and with
    /// [`Error::NotAMapping`] when a segment would descend into a leaf.
    pub fn lookup(&self, path: &str) -> Result<&Value> {
        let mut current: Option<&Value> = None;
        for segment in path.split(SEPARATOR) {
            let mapping = match current {
                None => self,
                Some(Value::Mapping(mapping)) => mapping,
                Some(_) => {
                    return Err(Error::NotAMapping {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
            };
            current = Some(
                mapping
                    .entries
                    .get(segment)
                    .ok_or_else(|| Error::not_found(path))?,
            );
        }
        current.ok_or_else(|| Error::not_found(path))
    }

    /// Resolve a dotted path, or `None` if it does not exist.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.lookup(path).ok()
    }

    /// Resolve a dotted path, falling back to `default`.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Value {
        self.get(path).cloned().unwrap_or_else(|| default.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_ok()
    }

    /// Borrow a string leaf.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)
            .and_then(Value::as_scalar)
            .and_then(Scalar::as_str)
    }

    /// Render any scalar leaf as text, or return `default`.
    pub fn get_string(&self, path: &str, default: &str) -> String {
        match self.get(path) {
            Some(Value::Scalar(scalar)) if *scalar != Scalar::Null => scalar.to_string(),
            _ => default.to_string(),
        }
    }

    /// Borrow a nested mapping.
    pub fn get_section(&self, path: &str) -> Option<&Config> {
        self.get(path).and_then(Value::as_mapping)
    }

    pub fn get_int(&self, path: &str, default: i64) -> i64 {
        self.require_int(path).unwrap_or(default)
    }

    /// Like [`get_int`](Self::get_int) but fails instead of defaulting.
    pub fn require_int(&self, path: &str) -> Result<i64> {
        self.lookup(path)?
            .as_scalar()
            .and_then(Scalar::to_int)
            .ok_or_else(|| Error::invalid_type(path, "an integer"))
    }

    pub fn get_float(&self, path: &str, default: f64) -> f64 {
        self.require_float(path).unwrap_or(default)
    }

    pub fn require_float(&self, path: &str) -> Result<f64> {
        self.lookup(path)?
            .as_scalar()
            .and_then(Scalar::to_float)
            .ok_or_else(|| Error::invalid_type(path, "a float"))
    }

    /// Boolean leaf, or a string matching the boolean literal table.
    pub fn get_boolean(&self, path: &str, default: bool) -> bool {
        self.require_boolean(path).unwrap_or(default)
    }

    pub fn get_bool(&self, path: &str, default: bool) -> bool {
        self.get_boolean(path, default)
    }

    pub fn require_boolean(&self, path: &str) -> Result<bool> {
        let state = match self.lookup(path)? {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            Value::Scalar(Scalar::String(s)) => boolean_literal(s),
            _ => None,
        };
        state.ok_or_else(|| Error::invalid_type(path, "a boolean"))
    }

    /// Read a list encoded as a JSON array literal, e.g. `["a","b"]` in an
    /// INI file. Sequence leaves are returned as they are.
    ///
    /// When the path is missing or does not hold a JSON list of scalars,
    /// `default` is parsed instead. Only a malformed `default` is an error.
    pub fn get_json(&self, path: &str, default: &str) -> Result<Vec<Scalar>> {
        let parsed = match self.get(path) {
            Some(Value::Sequence(items)) => return Ok(items.clone()),
            Some(Value::Scalar(Scalar::String(text))) => parse_json_list(text).ok(),
            _ => None,
        };
        match parsed {
            Some(items) => Ok(items),
            None => parse_json_list(default).map_err(|message| Error::InvalidJson {
                path: path.to_string(),
                message,
            }),
        }
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_json_list(text: &str) -> std::result::Result<Vec<Scalar>, String> {
    let parsed: JsonValue = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let JsonValue::Array(items) = parsed else {
        return Err("expected a JSON list".to_string());
    };
    items
        .iter()
        .map(|item| {
            value::scalar_from_json(item).ok_or_else(|| "list items must be scalars".to_string())
        })
        .collect()
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<JsonValue> for Config {
    type Error = Error;

    /// The document must be an object; `null` yields an empty mapping.
    fn try_from(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(Self::new()),
            JsonValue::Object(map) => value::config_from_json(map, ""),
            _ => Err(Error::structure("", "top-level document must be a mapping")),
        }
    }
}

impl TryFrom<serde_yaml::Value> for Config {
    type Error = Error;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        match value {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => value::config_from_yaml(map, ""),
            serde_yaml::Value::Tagged(tagged) => Self::try_from(tagged.value),
            _ => Err(Error::structure("", "top-level document must be a mapping")),
        }
    }
}

impl From<&Config> for JsonValue {
    fn from(config: &Config) -> Self {
        JsonValue::Object(
            config
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                .collect(),
        )
    }
}
