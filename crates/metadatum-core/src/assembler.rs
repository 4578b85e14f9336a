//! Document assembler: selects one token's metadata and wraps it as a metadatum.
//!
//! Input documents follow the 721 layout:
//!
//! ```json
//! {"721": {"<policy_id>": {"<token_name>": { ...metadata... }}, "version": 1}}
//! ```
//!
//! The metadatum is always `Constructor 0 [Map, Int(version)]`. A selector path
//! that does not exist yields the empty map rather than an error.

use crate::constants::{METADATUM_CONSTRUCTOR, VERSION_KEY};
use crate::encoder::{int_datum, kind_name, map_datum};
use crate::error::{DatumError, Result};
use crate::types::Datum;
use serde_json::{Map, Value};

/// The (tag, policy id, token name) triple naming the metadata to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: String,
    pub policy: String,
    pub token: String,
}

impl Selector {
    /// Build a selector from the tag, policy id and token name.
    pub fn new(tag: impl Into<String>, policy: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            policy: policy.into(),
            token: token.into(),
        }
    }
}

fn as_object<'a>(value: &'a Value, level: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        tracing::debug!(level, found = kind_name(value), "selector level is not an object");
        DatumError::TypeMismatch {
            expected: "object",
            found: kind_name(value),
        }
    })
}

/// Walk `document[tag][policy][token]`.
///
/// Returns `Ok(None)` when a key is missing at any level and `TypeMismatch`
/// when a level exists but is not an object.
pub fn select<'a>(document: &'a Value, selector: &Selector) -> Result<Option<&'a Map<String, Value>>> {
    let root = as_object(document, "document")?;
    let Some(tag) = root.get(&selector.tag) else {
        return Ok(None);
    };
    let Some(policy) = as_object(tag, "tag")?.get(&selector.policy) else {
        return Ok(None);
    };
    let Some(token) = as_object(policy, "policy")?.get(&selector.token) else {
        return Ok(None);
    };
    as_object(token, "token").map(Some)
}

/// Build the metadatum for the selected token.
///
/// # Example
/// ```
/// use metadatum_core::{create_metadatum, Selector};
/// use serde_json::json;
///
/// let document = json!({"721": {"policy_id": {"token_name": {"b": 0}}}});
/// let selector = Selector::new("721", "policy_id", "token_name");
/// let datum = create_metadatum(&document, &selector, 1).unwrap();
/// assert_eq!(
///     serde_json::to_string(&datum).unwrap(),
///     r#"{"constructor":0,"fields":[{"map":[{"k":{"bytes":"62"},"v":{"int":0}}]},{"int":1}]}"#
/// );
/// ```
pub fn create_metadatum(document: &Value, selector: &Selector, version: u64) -> Result<Datum> {
    let version = int_datum(&Value::from(version))?;
    let metadata = match select(document, selector)? {
        Some(metadata) => map_datum(metadata)?,
        None => {
            tracing::info!(
                tag = %selector.tag,
                policy = %selector.policy,
                token = %selector.token,
                "selector path not present, emitting empty metadatum"
            );
            Datum::empty_map()
        }
    };
    Ok(Datum::Constructor {
        tag: METADATUM_CONSTRUCTOR,
        fields: vec![metadata, version],
    })
}

/// Parse a JSON document and return the compact metadatum JSON.
pub fn convert(json: &str, selector: &Selector, version: u64) -> Result<String> {
    let document: Value = serde_json::from_str(json)?;
    let datum = create_metadatum(&document, selector, version)?;
    Ok(serde_json::to_string(&datum)?)
}

/// Return the only key of `map`, or fail when there are zero or several.
fn single_key<'a>(map: &'a Map<String, Value>, level: &'static str) -> Result<&'a String> {
    let mut keys = map.keys();
    match (keys.next(), map.len()) {
        (Some(key), 1) => Ok(key),
        (None, _) => Err(DatumError::NotFound(format!("no {level} entry in document"))),
        (_, count) => Err(DatumError::AmbiguousSelector { level, count }),
    }
}

/// Derive the selector of a document that holds exactly one tag, one policy
/// (next to its `version` entry) and one token.
///
/// Multi-tag, multi-policy and multi-token documents fail with
/// `AmbiguousSelector`; no candidate is ever picked on the caller's behalf.
pub fn locate_single_selector(document: &Value) -> Result<Selector> {
    let root = as_object(document, "document")?;
    let tag = single_key(root, "tag")?;

    let tag_object = as_object(&root[tag], "tag")?;
    let policies: Vec<&String> = tag_object.keys().filter(|k| *k != VERSION_KEY).collect();
    if policies.len() > 1 {
        return Err(DatumError::AmbiguousSelector {
            level: "policy",
            count: policies.len(),
        });
    }
    let policy = match (policies.first(), tag_object.contains_key(VERSION_KEY)) {
        (Some(policy), true) => *policy,
        (None, _) => {
            return Err(DatumError::NotFound(format!("no policy entry under tag {tag}")));
        }
        (Some(_), false) => {
            return Err(DatumError::NotFound(format!(
                "no {VERSION_KEY} entry beside the policy under tag {tag}"
            )));
        }
    };

    let token = single_key(as_object(&tag_object[policy], "policy")?, "token")?;

    tracing::debug!(%tag, %policy, %token, "derived selector");
    Ok(Selector::new(tag.clone(), policy.clone(), token.clone()))
}
