//! Metadata encoder: converts JSON values into `Datum` nodes.
//!
//! Dispatch is on the runtime kind of each `serde_json::Value`:
//!
//! - **Strings** are hex encoded (UTF-8 bytes) and wrapped by [`bytes_datum`],
//!   which splits payloads over [`MAX_LENGTH`] hex characters into a `List` of chunks
//! - **Integers** must be non-negative and become `Int`
//! - **Arrays** become `List`; the first element decides how every element is encoded
//! - **Objects** become `Map`, keys encoded by [`key_datum`] (truncated, never chunked)
//! - **Booleans, floats and null** are rejected with `UnsupportedType`
//!
//! Any error aborts the whole conversion; no partial tree is returned.
//!
//! # Example
//! ```
//! use metadatum_core::encoder::value_datum;
//! use metadatum_core::Datum;
//! use serde_json::json;
//!
//! let datum = value_datum(&json!({"b": 0})).unwrap();
//! assert_eq!(
//!     datum,
//!     Datum::Map(vec![(Datum::Bytes("62".into()), Datum::Int(0))])
//! );
//! ```

use crate::constants::{MAX_KEY_LENGTH, MAX_LENGTH};
use crate::error::{DatumError, Result};
use crate::types::Datum;
use serde_json::{Map, Number, Value};

/// Encodable kinds of JSON value. Everything else has no datum mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Text,
    Integer,
    List,
    Object,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::Text => "string",
            Kind::Integer => "integer",
            Kind::List => "list",
            Kind::Object => "object",
        }
    }
}

/// Classify a value, rejecting kinds the datum format cannot carry.
fn classify(value: &Value) -> Result<Kind> {
    match value {
        Value::String(_) => Ok(Kind::Text),
        Value::Number(n) if is_integer(n) => Ok(Kind::Integer),
        Value::Array(_) => Ok(Kind::List),
        Value::Object(_) => Ok(Kind::Object),
        other => Err(DatumError::UnsupportedType(kind_name(other))),
    }
}

/// Integral JSON number, including literals too wide for `i64`/`u64` that
/// `serde_json` can only hold as a whole-valued `f64`.
fn is_integer(n: &Number) -> bool {
    n.is_u64()
        || n.is_i64()
        || n.as_f64()
            .is_some_and(|f| f.fract() == 0.0 && (f >= u64::MAX as f64 || f < i64::MIN as f64))
}

/// Human-readable JSON kind, used in error messages.
pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if is_integer(n) => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Encode a non-negative integer as `Int`.
///
/// Negative integers and integers above `u64::MAX` fail with `InvalidValue`;
/// floats and non-numbers fail with `TypeMismatch`.
pub fn int_datum(value: &Value) -> Result<Datum> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok(Datum::Int(u))
            } else if let Some(i) = n.as_i64() {
                Err(DatumError::InvalidValue(format!(
                    "integer must be non-negative, got {i}"
                )))
            } else if is_integer(n) {
                Err(DatumError::InvalidValue(format!("integer out of range: {n}")))
            } else {
                Err(DatumError::TypeMismatch {
                    expected: "integer",
                    found: "float",
                })
            }
        }
        other => Err(DatumError::TypeMismatch {
            expected: "integer",
            found: kind_name(other),
        }),
    }
}

/// Lowercase hex of the UTF-8 bytes of `text`.
pub fn hex_text(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Hex encode a JSON string. Any other kind fails with `TypeMismatch`.
pub fn to_hex(value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(hex_text(text)),
        other => Err(DatumError::TypeMismatch {
            expected: "string",
            found: kind_name(other),
        }),
    }
}

/// Wrap an already hex-encoded string as `Bytes`, chunking when it is longer
/// than [`MAX_LENGTH`].
///
/// Chunks are consecutive 128-character slices in source order; the last one
/// holds the remainder. Non-hex input fails with `InvalidValue`.
pub fn bytes_datum(hex: &str) -> Result<Datum> {
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(DatumError::InvalidValue(format!(
            "byte string contains non-hex character {bad:?}"
        )));
    }
    let hex = hex.to_ascii_lowercase();
    if hex.len() <= MAX_LENGTH {
        return Ok(Datum::Bytes(hex));
    }

    // ASCII only past the check above, so byte offsets are char boundaries.
    let chunks: Vec<Datum> = (0..hex.len())
        .step_by(MAX_LENGTH)
        .map(|start| {
            let end = (start + MAX_LENGTH).min(hex.len());
            Datum::Bytes(hex[start..end].to_string())
        })
        .collect();
    tracing::trace!(len = hex.len(), chunks = chunks.len(), "chunked byte string");
    Ok(Datum::List(chunks))
}

/// Encode a map key.
///
/// Keys are cut to the longest prefix of at most [`MAX_KEY_LENGTH`] characters
/// that also fits in [`MAX_KEY_LENGTH`] UTF-8 bytes, then hex encoded through
/// [`bytes_datum`]. The result is always a single `Bytes` node; ASCII keys keep
/// exactly their first 64 characters.
pub fn key_datum(key: &str) -> Result<Datum> {
    let end = key
        .char_indices()
        .take(MAX_KEY_LENGTH)
        .map(|(start, c)| start + c.len_utf8())
        .take_while(|end| *end <= MAX_KEY_LENGTH)
        .last()
        .unwrap_or(0);
    if end < key.len() {
        tracing::debug!(key, kept = end, "truncating map key");
    }
    bytes_datum(&hex_text(&key[..end]))
}

/// Encode any supported JSON value.
pub fn value_datum(value: &Value) -> Result<Datum> {
    match value {
        Value::String(text) => bytes_datum(&hex_text(text)),
        Value::Number(n) if is_integer(n) => int_datum(value),
        Value::Array(items) => list_datum(items),
        Value::Object(map) => map_datum(map),
        other => Err(DatumError::UnsupportedType(kind_name(other))),
    }
}

/// Encode an object as an ordered `Map`, one pair per entry in source order.
pub fn map_datum(map: &Map<String, Value>) -> Result<Datum> {
    map.iter()
        .map(|(key, value)| Ok((key_datum(key)?, value_datum(value)?)))
        .collect::<Result<Vec<_>>>()
        .map(Datum::Map)
}

/// Encode an array as a `List`.
///
/// The first element's kind decides the branch for the whole list. Elements of
/// another supported kind fail with `TypeMismatch`; elements with no datum
/// mapping fail with `UnsupportedType` wherever they sit.
pub fn list_datum(items: &[Value]) -> Result<Datum> {
    let Some(first) = items.first() else {
        return Ok(Datum::List(Vec::new()));
    };
    let kind = classify(first)?;
    items
        .iter()
        .map(|item| {
            let found = classify(item)?;
            if found != kind {
                return Err(DatumError::TypeMismatch {
                    expected: kind.name(),
                    found: found.name(),
                });
            }
            value_datum(item)
        })
        .collect::<Result<Vec<_>>>()
        .map(Datum::List)
}
