//! # metadatum-core
//!
//! Converts token metadata JSON into a **Plutus datum** suitable for CIP-68
//! reference tokens.
//!
//! The encoder maps strings to hex `bytes`, non-negative integers to `int`,
//! arrays to `list` and objects to ordered `map` nodes. Byte strings longer
//! than 64 bytes (128 hex characters) are split into a list of chunks; map
//! keys are truncated to 64 characters instead. The selected token's map is
//! wrapped as `Constructor 0 [map, int(version)]`.
//!
//! ## Quick start
//!
//! ```rust
//! use metadatum_core::{convert, Selector};
//!
//! let json = r#"{"721":{"policy_id":{"token_name":{"b":0}}}}"#;
//! let selector = Selector::new("721", "policy_id", "token_name");
//! let datum = convert(json, &selector, 1).unwrap();
//! assert_eq!(
//!     datum,
//!     r#"{"constructor":0,"fields":[{"map":[{"k":{"bytes":"62"},"v":{"int":0}}]},{"int":1}]}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`encoder`]: JSON value → `Datum` (scalar, key and structural encoders)
//! - [`assembler`]: selector lookup and the metadatum wrapper
//! - [`decoder`]: datum JSON → `Datum`, chunk reassembly
//! - [`types`]: the `Datum` tree and its JSON serialization
//! - [`constants`]: byte-string and key length limits
//! - [`error`]: error taxonomy

pub mod assembler;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod types;

pub use assembler::{convert, create_metadatum, locate_single_selector, select, Selector};
pub use constants::{MAX_KEY_LENGTH, MAX_LENGTH};
pub use decoder::{decode, decode_text};
pub use encoder::{bytes_datum, hex_text, int_datum, key_datum, list_datum, map_datum, to_hex, value_datum};
pub use error::{DatumError, Result};
pub use types::{Datum, DatumStats};
