//! Value encoding
//!
//! Converts caller arguments into the canonical byte strings sent as blocks.

use bytes::Bytes;

use super::Block;
use crate::error::{Result, SsdbError};

/// An argument that can be sent to the server
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text, sent unchanged
    Text(String),

    /// Raw bytes, sent unchanged
    Bytes(Bytes),

    /// Signed integer, sent as plain decimal
    Int(i64),

    /// Float, sent as fixed-point with six fractional digits
    Float(f64),

    /// Boolean, sent as `1` / `0`
    Bool(bool),

    /// Absent value, sent as an empty block
    Null,
}

impl Value {
    /// Encode this value into a single block
    ///
    /// Fails only for floats with no decimal rendering (NaN, infinities).
    pub fn encode(&self) -> Result<Block> {
        let block = match self {
            Value::Text(s) => Bytes::copy_from_slice(s.as_bytes()),
            Value::Bytes(b) => b.clone(),
            Value::Int(n) => Bytes::from(n.to_string()),
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(SsdbError::Encoding(format!(
                        "float {} has no fixed-point representation",
                        f
                    )));
                }
                Bytes::from(format!("{:.6}", f))
            }
            Value::Bool(true) => Bytes::from_static(b"1"),
            Value::Bool(false) => Bytes::from_static(b"0"),
            Value::Null => Bytes::new(),
        };
        Ok(block)
    }
}

/// Encode an ordered argument list into blocks
///
/// Either every value encodes or none are returned.
pub fn encode_values<'a, I>(values: I) -> Result<Vec<Block>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(Value::encode).collect()
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<&Bytes> for Value {
    fn from(b: &Bytes) -> Self {
        Value::Bytes(b.clone())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
