//! Tolerant wire types for fields the API serializes inconsistently.
//!
//! The upstream service is observed to serialize the same logical field
//! with different JSON types across endpoints and even across responses
//! of the same endpoint: an amount may arrive as `3.5`, `100`, or
//! `"3.5"`, and an ID as `"1234"` or `1234`. These newtypes absorb the
//! inconsistency at the deserialization boundary so typed results are
//! uniform regardless of wire shape.

use std::fmt::{Display, Formatter};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A monetary quantity whose wire form varies.
///
/// Accepted JSON shapes:
///
/// - number, integer or fractional: `100`, `3.5`
/// - string containing a number: `"3.5"`
/// - `null`, or an absent field (with `#[serde(default)]`): zero
///
/// Any other JSON type is a deserialization error. Absence decodes to
/// zero rather than erroring because several endpoints omit the field
/// while the amount is not yet determined (e.g. a payment awaiting
/// exchange-rate calculation).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Amount(pub f64);

impl Amount {
    /// Returns the normalized floating-point value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns true for the zero/absent state.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self(0.0)),
            Value::Number(n) => n
                .as_f64()
                .map(Self)
                .ok_or_else(|| D::Error::custom("amount does not fit in an f64")),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("amount string {s:?} is not numeric"))),
            other => Err(D::Error::custom(format!(
                "amount must be a number or a numeric string, got {}",
                type_name(&other)
            ))),
        }
    }
}

/// An identifier whose wire form varies between string and integer.
///
/// Normalized to a string. `null` and absent fields decode to the
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Id(pub String);

impl Id {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when no identifier was present on the wire.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Self(String::new())),
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::String(s) => Ok(Self(s)),
            other => Err(D::Error::custom(format!(
                "id must be a string or a number, got {}",
                type_name(&other)
            ))),
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
