//! Protocol limits shared by the byte and key encoders.

/// Longest hex payload a single `Bytes` node may carry (64 raw bytes).
///
/// Longer byte strings are split into a `List` of chunks of this size.
pub const MAX_LENGTH: usize = 128;

/// Longest map key, in characters, before hex encoding.
///
/// Keys are truncated to this length instead of being chunked.
pub const MAX_KEY_LENGTH: usize = MAX_LENGTH / 2;

/// Constructor index of the metadatum wrapper.
pub const METADATUM_CONSTRUCTOR: u64 = 0;

/// Entry that sits beside the policy id inside a tag object.
pub const VERSION_KEY: &str = "version";
