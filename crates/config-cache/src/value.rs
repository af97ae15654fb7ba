//! Tagged values stored in a [`Config`]
//!
//! A value is either a scalar leaf, a sequence of scalars, or a nested
//! mapping. Sequences never contain mappings or other sequences.

use std::fmt;

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::config::Config;
use crate::error::{Error, Result};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Empty YAML/JSON leaf (`~`, `null`, or a key with no value)
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce to an integer. Floats truncate toward zero, strings are parsed.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Self::Bool(b) => Some(i64::from(*b)),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce to a float. Integers widen, strings are parsed.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::String(s) => s.trim().parse().ok(),
            Self::Null => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A node in a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
    Mapping(Config),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Scalar]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Config> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Scalars and sequences are leaves; mappings are not.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Self::Mapping(_))
    }
}

macro_rules! scalar_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_value_from!(&str, String, i64, f64, bool);

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Config> for Value {
    fn from(map: Config) -> Self {
        Self::Mapping(map)
    }
}

impl From<&Scalar> for JsonValue {
    fn from(scalar: &Scalar) -> Self {
        match scalar {
            Scalar::Null => JsonValue::Null,
            Scalar::Bool(b) => JsonValue::Bool(*b),
            Scalar::Int(i) => JsonValue::from(*i),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Scalar::String(s) => JsonValue::String(s.clone()),
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Scalar(s) => s.into(),
            Value::Sequence(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            Value::Mapping(map) => map.into(),
        }
    }
}

/// Join a parent key path and a child key for error reporting.
pub(crate) fn child_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

pub(crate) fn scalar_from_json(value: &JsonValue) -> Option<Scalar> {
    match value {
        JsonValue::Null => Some(Scalar::Null),
        JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        JsonValue::String(s) => Some(Scalar::String(s.clone())),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

pub(crate) fn value_from_json(value: JsonValue, key: &str) -> Result<Value> {
    match value {
        JsonValue::Object(map) => config_from_json(map, key).map(Value::Mapping),
        JsonValue::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                scalar_from_json(item).ok_or_else(|| {
                    Error::structure(
                        &format!("{key}[{idx}]"),
                        "sequences may only contain scalars",
                    )
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        other => scalar_from_json(&other)
            .map(Value::Scalar)
            .ok_or_else(|| Error::structure(key, "unsupported JSON value")),
    }
}

pub(crate) fn config_from_json(
    map: serde_json::Map<String, JsonValue>,
    key: &str,
) -> Result<Config> {
    map.into_iter()
        .map(|(k, v)| {
            let path = child_key(key, &k);
            value_from_json(v, &path).map(|v| (k, v))
        })
        .collect()
}

fn scalar_from_yaml(value: &YamlValue) -> Option<Scalar> {
    match value {
        YamlValue::Null => Some(Scalar::Null),
        YamlValue::Bool(b) => Some(Scalar::Bool(*b)),
        YamlValue::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        YamlValue::String(s) => Some(Scalar::String(s.clone())),
        YamlValue::Tagged(tagged) => scalar_from_yaml(&tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

fn yaml_key(key: &YamlValue, parent: &str) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        _ => Err(Error::structure(parent, "mapping keys must be scalars")),
    }
}

pub(crate) fn value_from_yaml(value: YamlValue, key: &str) -> Result<Value> {
    match value {
        YamlValue::Mapping(map) => config_from_yaml(map, key).map(Value::Mapping),
        YamlValue::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                scalar_from_yaml(item).ok_or_else(|| {
                    Error::structure(
                        &format!("{key}[{idx}]"),
                        "sequences may only contain scalars",
                    )
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        YamlValue::Tagged(tagged) => value_from_yaml(tagged.value, key),
        other => scalar_from_yaml(&other)
            .map(Value::Scalar)
            .ok_or_else(|| Error::structure(key, "unsupported YAML value")),
    }
}

pub(crate) fn config_from_yaml(map: serde_yaml::Mapping, key: &str) -> Result<Config> {
    map.into_iter()
        .map(|(k, v)| {
            let name = yaml_key(&k, key)?;
            let path = child_key(key, &name);
            value_from_yaml(v, &path).map(|v| (name, v))
        })
        .collect()
}
