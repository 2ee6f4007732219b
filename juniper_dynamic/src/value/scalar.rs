use std::fmt;

use derive_more::with_trait::From;
use serde::{Deserialize, Serialize};

/// Leaf value of the runtime object model.
///
/// Mirrors the four built-in GraphQL scalar representations. Custom scalars
/// serialize into one of these.
#[derive(Clone, Debug, Deserialize, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// [`i32`] value.
    Int(i32),

    /// [`f64`] value.
    Float(f64),

    /// [`String`] value.
    String(String),

    /// [`bool`] value.
    Boolean(bool),
}

impl ScalarValue {
    /// Returns the [`i32`] held by this [`ScalarValue`], if any.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns this [`ScalarValue`] as [`f64`], if it's numeric.
    ///
    /// Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string held by this [`ScalarValue`], if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the [`bool`] held by this [`ScalarValue`], if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}
