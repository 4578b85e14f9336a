//! Datum reader: parses datum JSON back into a [`Datum`] tree.
//!
//! Accepts exactly the shape the encoder writes. Every node is a single-key
//! object (`int`, `bytes`, `list`, `map`) or a `constructor`/`fields` pair;
//! anything else is a `MalformedDatum` error carrying the JSON path.

use crate::constants::MAX_LENGTH;
use crate::error::{DatumError, Result};
use crate::types::Datum;
use serde_json::{Map, Value};

/// Parse a datum JSON string.
pub fn decode(json: &str) -> Result<Datum> {
    let value: Value = serde_json::from_str(json)?;
    Datum::try_from(&value)
}

/// Reassemble a (possibly chunked) byte string and decode it as UTF-8 text.
pub fn decode_text(datum: &Datum) -> Result<String> {
    let hex = datum
        .joined_bytes()
        .ok_or_else(|| DatumError::MalformedDatum("expected bytes or a list of bytes".into()))?;
    let raw = hex::decode(&hex).map_err(|e| DatumError::MalformedDatum(e.to_string()))?;
    String::from_utf8(raw).map_err(|e| DatumError::MalformedDatum(e.to_string()))
}

impl TryFrom<&Value> for Datum {
    type Error = DatumError;

    fn try_from(value: &Value) -> Result<Self> {
        parse_node(value, "$")
    }
}

fn malformed(path: &str, message: impl std::fmt::Display) -> DatumError {
    DatumError::MalformedDatum(format!("{path}: {message}"))
}

fn parse_node(value: &Value, path: &str) -> Result<Datum> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed(path, "datum node must be an object"))?;

    if object.contains_key("constructor") {
        return parse_constructor(object, path);
    }
    if object.len() != 1 {
        return Err(malformed(
            path,
            format!("expected exactly one key, found {}", object.len()),
        ));
    }

    let (key, payload) = object
        .iter()
        .next()
        .ok_or_else(|| malformed(path, "empty datum node"))?;
    let path = format!("{path}.{key}");
    match key.as_str() {
        "int" => payload
            .as_u64()
            .map(Datum::Int)
            .ok_or_else(|| malformed(&path, "expected a non-negative integer")),
        "bytes" => parse_bytes(payload, &path),
        "list" => parse_items(payload, &path).map(Datum::List),
        "map" => parse_pairs(payload, &path).map(Datum::Map),
        other => Err(malformed(&path, format!("unknown datum key {other:?}"))),
    }
}

fn parse_bytes(payload: &Value, path: &str) -> Result<Datum> {
    let hex = payload
        .as_str()
        .ok_or_else(|| malformed(path, "expected a hex string"))?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed(path, "bytes must be hex encoded"));
    }
    if hex.len() > MAX_LENGTH {
        return Err(malformed(
            path,
            format!("bytes longer than {MAX_LENGTH} hex characters"),
        ));
    }
    Ok(Datum::Bytes(hex.to_ascii_lowercase()))
}

fn parse_items(payload: &Value, path: &str) -> Result<Vec<Datum>> {
    payload
        .as_array()
        .ok_or_else(|| malformed(path, "expected an array"))?
        .iter()
        .enumerate()
        .map(|(i, item)| parse_node(item, &format!("{path}[{i}]")))
        .collect()
}

fn parse_pairs(payload: &Value, path: &str) -> Result<Vec<(Datum, Datum)>> {
    let entries = payload
        .as_array()
        .ok_or_else(|| malformed(path, "expected an array of k/v pairs"))?;
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let path = format!("{path}[{i}]");
            let pair = entry
                .as_object()
                .filter(|pair| pair.len() == 2)
                .ok_or_else(|| malformed(&path, "map entry must be {\"k\": ..., \"v\": ...}"))?;
            let k = pair.get("k").ok_or_else(|| malformed(&path, "missing k"))?;
            let v = pair.get("v").ok_or_else(|| malformed(&path, "missing v"))?;
            Ok((
                parse_node(k, &format!("{path}.k"))?,
                parse_node(v, &format!("{path}.v"))?,
            ))
        })
        .collect()
}

fn parse_constructor(object: &Map<String, Value>, path: &str) -> Result<Datum> {
    if object.len() != 2 {
        return Err(malformed(path, "constructor must have exactly constructor and fields"));
    }
    let tag = object
        .get("constructor")
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed(path, "constructor index must be a non-negative integer"))?;
    let fields = object
        .get("fields")
        .ok_or_else(|| malformed(path, "missing fields"))?;
    let fields = parse_items(fields, &format!("{path}.fields"))?;
    Ok(Datum::Constructor { tag, fields })
}
