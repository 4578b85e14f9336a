//! The `Datum` tree produced by the encoder.
//!
//! Serialization follows the detailed-schema JSON used by `cardano-cli`:
//! `{"int": n}`, `{"bytes": "hex"}`, `{"list": [...]}`,
//! `{"map": [{"k": ..., "v": ...}]}` and `{"constructor": n, "fields": [...]}`.

use crate::constants::MAX_LENGTH;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A Plutus data node.
///
/// Map entries are kept as `Vec<(Datum, Datum)>` so the output preserves the
/// source key order instead of sorting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    /// Non-negative integer.
    Int(u64),
    /// Lowercase hex, at most [`MAX_LENGTH`] characters.
    Bytes(String),
    List(Vec<Datum>),
    /// Key/value pairs in insertion order.
    Map(Vec<(Datum, Datum)>),
    Constructor { tag: u64, fields: Vec<Datum> },
}

impl Datum {
    /// The `Map([])` node used whenever there is nothing to encode.
    pub fn empty_map() -> Self {
        Datum::Map(Vec::new())
    }

    /// Hex payload of a byte string, reassembling chunked lists in order.
    ///
    /// Returns `None` for anything that is not a `Bytes` node or a `List`
    /// made only of `Bytes` nodes.
    pub fn joined_bytes(&self) -> Option<String> {
        match self {
            Datum::Bytes(hex) => Some(hex.clone()),
            Datum::List(items) => items.iter().try_fold(String::new(), |mut acc, item| {
                match item {
                    Datum::Bytes(hex) => {
                        acc.push_str(hex);
                        Some(acc)
                    }
                    _ => None,
                }
            }),
            _ => None,
        }
    }

    /// Walk the tree and count nodes per variant.
    pub fn stats(&self) -> DatumStats {
        let mut stats = DatumStats::default();
        collect_stats(self, 1, &mut stats);
        stats
    }
}

/// Node counts for a datum tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatumStats {
    pub ints: usize,
    pub bytes: usize,
    pub lists: usize,
    pub maps: usize,
    pub constructors: usize,
    /// Lists of `Bytes` whose leading chunk fills `MAX_LENGTH`, i.e. strings
    /// that were split by the byte encoder.
    pub chunked_strings: usize,
    pub max_depth: usize,
}

fn collect_stats(datum: &Datum, depth: usize, stats: &mut DatumStats) {
    stats.max_depth = stats.max_depth.max(depth);
    match datum {
        Datum::Int(_) => stats.ints += 1,
        Datum::Bytes(_) => stats.bytes += 1,
        Datum::List(items) => {
            stats.lists += 1;
            if is_chunked_string(items) {
                stats.chunked_strings += 1;
            }
            for item in items {
                collect_stats(item, depth + 1, stats);
            }
        }
        Datum::Map(pairs) => {
            stats.maps += 1;
            for (k, v) in pairs {
                collect_stats(k, depth + 1, stats);
                collect_stats(v, depth + 1, stats);
            }
        }
        Datum::Constructor { fields, .. } => {
            stats.constructors += 1;
            for field in fields {
                collect_stats(field, depth + 1, stats);
            }
        }
    }
}

fn is_chunked_string(items: &[Datum]) -> bool {
    matches!(items.first(), Some(Datum::Bytes(first)) if first.len() == MAX_LENGTH)
        && items.iter().all(|item| matches!(item, Datum::Bytes(_)))
}

impl Serialize for Datum {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Datum::Int(n) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("int", n)?;
                map.end()
            }
            Datum::Bytes(hex) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("bytes", hex)?;
                map.end()
            }
            Datum::List(items) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("list", items)?;
                map.end()
            }
            Datum::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("map", &Pairs(pairs))?;
                map.end()
            }
            Datum::Constructor { tag, fields } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("constructor", tag)?;
                map.serialize_entry("fields", fields)?;
                map.end()
            }
        }
    }
}

/// Serializes map entries as `[{"k": ..., "v": ...}, ...]`.
struct Pairs<'a>(&'a [(Datum, Datum)]);

#[derive(Serialize)]
struct Pair<'a> {
    k: &'a Datum,
    v: &'a Datum,
}

impl Serialize for Pairs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|(k, v)| Pair { k, v }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_constructor_field_order() {
        let datum = Datum::Constructor {
            tag: 0,
            fields: vec![Datum::empty_map(), Datum::Int(1)],
        };
        assert_eq!(
            serde_json::to_string(&datum).unwrap(),
            r#"{"constructor":0,"fields":[{"map":[]},{"int":1}]}"#
        );
    }

    #[test]
    fn serializes_map_pairs_as_k_v_objects() {
        let datum = Datum::Map(vec![(Datum::Bytes("62".into()), Datum::Int(0))]);
        assert_eq!(
            serde_json::to_string(&datum).unwrap(),
            r#"{"map":[{"k":{"bytes":"62"},"v":{"int":0}}]}"#
        );
    }

    #[test]
    fn joined_bytes_rejects_mixed_lists() {
        let mixed = Datum::List(vec![Datum::Bytes("61".into()), Datum::Int(1)]);
        assert_eq!(mixed.joined_bytes(), None);
        assert_eq!(Datum::List(vec![]).joined_bytes(), Some(String::new()));
    }

    #[test]
    fn stats_counts_every_node() {
        let datum = Datum::Constructor {
            tag: 0,
            fields: vec![
                Datum::Map(vec![(
                    Datum::Bytes("61".into()),
                    Datum::List(vec![Datum::Bytes("a".repeat(MAX_LENGTH)), Datum::Bytes("b".into())]),
                )]),
                Datum::Int(1),
            ],
        };
        let stats = datum.stats();
        assert_eq!(stats.constructors, 1);
        assert_eq!(stats.maps, 1);
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.bytes, 3);
        assert_eq!(stats.ints, 1);
        assert_eq!(stats.chunked_strings, 1);
        assert_eq!(stats.max_depth, 4);
    }
}
