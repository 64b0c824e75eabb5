//! Column values of synthetic results.
//!
//! The emulation only ever materializes the handful of column types the
//! engine's bootstrap statements touch: identifiers, strings, integers,
//! booleans, raw metadata bytes and timestamps.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

pub type ValueResult<T> = Result<T, ValueError>;

/// Error raised by typed value extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("expected a {expected} value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A single database value.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Uuid(Uuid),
    Text(String),
    Integer(i64),
    Bool(bool),
    Bytes(Vec<u8>),
    DateTime(DateTime<Utc>),
    Null,
}

impl DbValue {
    /// Name of the value's type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            DbValue::Uuid(_) => "uuid",
            DbValue::Text(_) => "text",
            DbValue::Integer(_) => "integer",
            DbValue::Bool(_) => "boolean",
            DbValue::Bytes(_) => "bytes",
            DbValue::DateTime(_) => "datetime",
            DbValue::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }

    pub fn as_uuid(&self) -> ValueResult<Uuid> {
        match self {
            DbValue::Uuid(id) => Ok(*id),
            other => Err(ValueError::TypeMismatch {
                expected: "uuid",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_str(&self) -> ValueResult<&str> {
        match self {
            DbValue::Text(text) => Ok(text),
            other => Err(ValueError::TypeMismatch {
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_i64(&self) -> ValueResult<i64> {
        match self {
            DbValue::Integer(value) => Ok(*value),
            other => Err(ValueError::TypeMismatch {
                expected: "integer",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_bool(&self) -> ValueResult<bool> {
        match self {
            DbValue::Bool(value) => Ok(*value),
            other => Err(ValueError::TypeMismatch {
                expected: "boolean",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_bytes(&self) -> ValueResult<&[u8]> {
        match self {
            DbValue::Bytes(bytes) => Ok(bytes),
            other => Err(ValueError::TypeMismatch {
                expected: "bytes",
                actual: other.kind(),
            }),
        }
    }

    pub fn as_datetime(&self) -> ValueResult<DateTime<Utc>> {
        match self {
            DbValue::DateTime(value) => Ok(*value),
            other => Err(ValueError::TypeMismatch {
                expected: "datetime",
                actual: other.kind(),
            }),
        }
    }
}

impl fmt::Display for DbValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbValue::Uuid(id) => write!(f, "{id}"),
            DbValue::Text(text) => write!(f, "{text}"),
            DbValue::Integer(value) => write!(f, "{value}"),
            DbValue::Bool(value) => write!(f, "{value}"),
            DbValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            DbValue::DateTime(value) => write!(f, "{value}"),
            DbValue::Null => f.write_str("NULL"),
        }
    }
}

impl From<Uuid> for DbValue {
    fn from(id: Uuid) -> Self {
        DbValue::Uuid(id)
    }
}

impl From<&str> for DbValue {
    fn from(text: &str) -> Self {
        DbValue::Text(text.to_owned())
    }
}

impl From<String> for DbValue {
    fn from(text: String) -> Self {
        DbValue::Text(text)
    }
}

impl From<i64> for DbValue {
    fn from(value: i64) -> Self {
        DbValue::Integer(value)
    }
}

impl From<i32> for DbValue {
    fn from(value: i32) -> Self {
        DbValue::Integer(i64::from(value))
    }
}

impl From<bool> for DbValue {
    fn from(value: bool) -> Self {
        DbValue::Bool(value)
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(bytes: Vec<u8>) -> Self {
        DbValue::Bytes(bytes)
    }
}

impl From<DateTime<Utc>> for DbValue {
    fn from(value: DateTime<Utc>) -> Self {
        DbValue::DateTime(value)
    }
}
