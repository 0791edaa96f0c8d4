//! Gleaned values and the casts that produce them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// A single gleaned value.
///
/// Values start life as [`Value::Text`]; the other variants only appear
/// when a category carries a [`Cast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns the text if this is a [`Value::Text`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Error produced when a gleaned string cannot be converted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert `{value}` to {target}: {reason}")]
pub struct CastError {
    pub value: String,
    pub target: String,
    pub reason: String,
}

impl CastError {
    #[must_use]
    pub fn new(value: &str, target: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            value: value.to_string(),
            target: target.into(),
            reason: reason.to_string(),
        }
    }
}

/// Signature of a user supplied cast.
pub type CastFn = dyn Fn(&str) -> Result<Value, CastError> + Send + Sync;

/// Conversion applied to a category's value after translation.
#[derive(Clone)]
pub enum Cast {
    Text,
    Integer,
    Float,
    Bool,
    Custom(Arc<CastFn>),
}

impl Cast {
    /// Wrap a closure as a cast.
    #[must_use]
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Custom(_) => "custom",
        }
    }

    /// Convert a translated string.
    ///
    /// # Errors
    /// Returns a [`CastError`] when `raw` is not a valid instance of the
    /// target type.
    pub fn apply(&self, raw: &str) -> Result<Value, CastError> {
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| CastError::new(raw, "integer", e)),
            Self::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| CastError::new(raw, "float", e)),
            Self::Bool => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(CastError::new(raw, "bool", "not a boolean literal")),
            },
            Self::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cast {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "str" | "string" => Ok(Self::Text),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "number" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            other => Err(format!("unknown cast: {other}")),
        }
    }
}

impl Serialize for Cast {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Custom(_) => Err(serde::ser::Error::custom(
                "custom casts cannot be serialized",
            )),
            other => serializer.serialize_str(other.name()),
        }
    }
}

impl<'de> Deserialize<'de> for Cast {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
