mod common;

use common::{ann, bob, Person, Team};
use zson_core::{
    deserialize, deserialize_untyped, from_str, from_str_with, parse, serialize, to_string,
    to_string_with, Options, Reflect,
};

/// Assert that untyped deserialize → serialize reproduces `text` exactly.
fn assert_untyped_roundtrip(text: &str) {
    let options = Options::default().ignore_null(false).escape_special_chars(true);
    let host = deserialize_untyped(text, &options).expect("deserialize failed");
    let written = serialize(&host, &options).expect("nothing written");
    assert_eq!(written, text, "Roundtrip failed for {text}");
}

/// Assert that a typed value survives serialize → deserialize with `options`.
fn assert_typed_roundtrip<T: Reflect + PartialEq + std::fmt::Debug>(value: &T, options: &Options) {
    let text = to_string_with(value, options).expect("nothing written");
    let back: T = from_str_with(&text, options).expect("deserialize failed");
    assert_eq!(&back, value, "Roundtrip failed through:\n{text}");
}

// ============================================================================
// Untyped roundtrips
// ============================================================================

#[test]
fn roundtrip_scalars() {
    assert_untyped_roundtrip("42");
    assert_untyped_roundtrip("-42");
    assert_untyped_roundtrip("2.5");
    assert_untyped_roundtrip("true");
    assert_untyped_roundtrip("null");
    assert_untyped_roundtrip(r#""text""#);
}

#[test]
fn roundtrip_nested_document() {
    assert_untyped_roundtrip(r#"{"a":[1,2.5,"x"],"b":{"c":null,"d":{}},"e":[]}"#);
}

#[test]
fn roundtrip_escaped_text() {
    assert_untyped_roundtrip(r#"{"q":"say \"hi\"","p":"C:\\dir"}"#);
}

#[test]
fn serialization_is_idempotent() {
    let options = Options::default();
    let first = serialize(&deserialize_untyped("{'b':[3,1],'a':'x'}", &options).unwrap(), &options).unwrap();
    let second = serialize(&deserialize_untyped(&first, &options).unwrap(), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn reparse_of_output_matches_first_parse() {
    let source = "{'a':[1,2,{'b':true}],'c':'d'}";
    let options = Options::default();
    let written = serialize(&deserialize_untyped(source, &options).unwrap(), &options).unwrap();
    assert_eq!(parse(&written).unwrap(), parse(source).unwrap());
}

#[test]
fn pretty_output_parses_like_compact_output() {
    let source = "{'a':[1,2,{'b':true}],'c':{'d':'e'}}";
    let compact = Options::default();
    let pretty = Options::default().pretty(2);
    let host = deserialize_untyped(source, &compact).unwrap();
    let pretty_text = serialize(&host, &pretty).unwrap();
    assert!(pretty_text.contains('\n'));
    assert_eq!(parse(&pretty_text).unwrap(), parse(source).unwrap());
}

// ============================================================================
// Typed roundtrips
// ============================================================================

#[test]
fn roundtrip_person() {
    assert_typed_roundtrip(&ann(), &Options::default());
    assert_typed_roundtrip(&bob(), &Options::default());
}

#[test]
fn roundtrip_person_pretty_with_custom_dates() {
    let options = Options::default().pretty(2).date_format("dd.MM.yyyy HH:mm:ss");
    assert_typed_roundtrip(&ann(), &options);
}

#[test]
fn roundtrip_team() {
    let team = Team {
        title: "core".to_string(),
        lead: Some(ann()),
        members: vec![ann(), bob()],
    };
    assert_typed_roundtrip(&team, &Options::default());
}

#[test]
fn roundtrip_through_host() {
    let host = ann().to_host();
    assert_eq!(Person::from_host(host).unwrap(), ann());
}

#[test]
fn typed_text_deserializes_against_record_shape() {
    let text = to_string(&bob()).unwrap();
    let host = deserialize(&text, &Person::shape(), &Options::default()).unwrap();
    assert_eq!(host, bob().to_host());
    let back: Person = from_str(&text).unwrap();
    assert_eq!(back, bob());
}

#[test]
fn unicode_output_roundtrips_after_decode() {
    let mut person = bob();
    person.name = "王小明".to_string();
    let options = Options::default().unicode_output(true);
    let text = to_string_with(&person, &options).unwrap();
    assert!(text.contains("\\u738b"));
    let decoded = zson_core::unicode::decode(&text);
    let back: Person = from_str(&decoded).unwrap();
    assert_eq!(back, person);
}
