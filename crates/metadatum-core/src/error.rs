//! Error types for datum encoding and datum reading.

use thiserror::Error;

/// Errors that can occur while converting metadata into a datum.
///
/// Every variant aborts the conversion. A selector path that does not resolve
/// is not an error for [`create_metadatum`](crate::create_metadatum); it yields
/// the empty metadatum instead. `NotFound` is only raised by callers that ask
/// for a path strictly, such as [`locate_single_selector`](crate::locate_single_selector).
#[derive(Error, Debug)]
pub enum DatumError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A value had a different runtime kind than the position requires.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A value of the right kind broke a domain rule (e.g. a negative integer).
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A JSON kind with no datum mapping (boolean, null, float).
    #[error("Forbidden Plutus Type: {0}")]
    UnsupportedType(&'static str),

    /// A required entry was missing from the document.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Selector derivation found more than one candidate at a level.
    #[error("Ambiguous selector: {count} candidates at the {level} level")]
    AmbiguousSelector { level: &'static str, count: usize },

    /// A datum JSON document did not have the expected shape.
    #[error("Malformed datum: {0}")]
    MalformedDatum(String),
}

/// Convenience alias used throughout metadatum-core.
pub type Result<T> = std::result::Result<T, DatumError>;
