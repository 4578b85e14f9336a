/// Datum reader tests: parsing encoder output back into `Datum` trees and
/// rejecting malformed datum JSON.
use metadatum_core::{convert, decode, decode_text, Datum, DatumError, Selector};

#[test]
fn decode_reads_encoder_output() {
    let json = r#"{"721":{"p":{"t":{"name":"Token","tags":["a","b"],"n":7}}}}"#;
    let out = convert(json, &Selector::new("721", "p", "t"), 2).unwrap();
    let datum = decode(&out).unwrap();

    let Datum::Constructor { tag: 0, fields } = &datum else {
        panic!("expected constructor 0, got {datum:?}");
    };
    assert_eq!(fields[1], Datum::Int(2));
    let Datum::Map(pairs) = &fields[0] else {
        panic!("expected map");
    };
    assert_eq!(decode_text(&pairs[0].0).unwrap(), "name");
    assert_eq!(decode_text(&pairs[0].1).unwrap(), "Token");
    assert_eq!(
        pairs[1].1,
        Datum::List(vec![Datum::Bytes("61".into()), Datum::Bytes("62".into())])
    );
    assert_eq!(pairs[2].1, Datum::Int(7));

    // Serializing again gives the same text.
    assert_eq!(serde_json::to_string(&datum).unwrap(), out);
}

#[test]
fn decode_text_joins_chunks_in_order() {
    let text = "the quick brown fox jumps over the lazy dog ".repeat(4);
    let out = convert(
        &serde_json::json!({"t": {"p": {"n": {"d": text}}}}).to_string(),
        &Selector::new("t", "p", "n"),
        1,
    )
    .unwrap();
    let datum = decode(&out).unwrap();
    let Datum::Constructor { fields, .. } = datum else {
        panic!("expected constructor");
    };
    let Datum::Map(pairs) = &fields[0] else {
        panic!("expected map");
    };
    assert!(matches!(&pairs[0].1, Datum::List(chunks) if chunks.len() == 3));
    assert_eq!(decode_text(&pairs[0].1).unwrap(), text);
}

#[test]
fn decode_text_rejects_non_bytes() {
    assert!(matches!(
        decode_text(&Datum::Int(1)),
        Err(DatumError::MalformedDatum(_))
    ));
}

#[test]
fn decode_rejects_unknown_keys() {
    let err = decode(r#"{"string":"abc"}"#).unwrap_err();
    assert!(matches!(err, DatumError::MalformedDatum(_)));
}

#[test]
fn decode_rejects_negative_int() {
    assert!(decode(r#"{"int":-1}"#).is_err());
}

#[test]
fn decode_rejects_oversized_bytes() {
    let json = format!(r#"{{"bytes":"{}"}}"#, "ab".repeat(65));
    let err = decode(&json).unwrap_err();
    assert!(err.to_string().contains("longer than 128"), "{err}");
}

#[test]
fn decode_rejects_non_hex_bytes() {
    assert!(decode(r#"{"bytes":"xyz"}"#).is_err());
}

#[test]
fn decode_rejects_map_entry_without_v() {
    let err = decode(r#"{"map":[{"k":{"bytes":"61"},"x":{"int":1}}]}"#).unwrap_err();
    assert!(err.to_string().contains("$.map[0]"), "{err}");
}

#[test]
fn decode_error_carries_path() {
    let err = decode(r#"{"list":[{"int":1},{"bytes":7}]}"#).unwrap_err();
    assert!(err.to_string().contains("$.list[1].bytes"), "{err}");
}

#[test]
fn decode_rejects_constructor_with_extra_keys() {
    assert!(decode(r#"{"constructor":0,"fields":[],"extra":1}"#).is_err());
}

#[test]
fn decode_empty_containers() {
    assert_eq!(decode(r#"{"map":[]}"#).unwrap(), Datum::Map(vec![]));
    assert_eq!(decode(r#"{"list":[]}"#).unwrap(), Datum::List(vec![]));
}
