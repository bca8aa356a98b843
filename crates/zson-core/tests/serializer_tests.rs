/// Serialize-direction tests: literal rendering, quoting, containers, records
/// and every formatting option.
mod common;

use common::{ann, at, Level, DOG};
use rust_decimal::Decimal;
use std::str::FromStr;
use zson_core::{
    serialize, to_string, to_string_with, Collection, Host, HostMap, Options, Record, Reflect,
    SerializeHandler,
};

fn compact(host: &Host) -> String {
    serialize(host, &Options::default()).unwrap()
}

fn rex() -> Record {
    Record::new(&DOG)
        .with("name", "Rex")
        .with("legs", 4)
        .with("breed", "lab")
        .with("cache", "warm")
        .with("id", 7i64)
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn numbers_render_as_literals() {
    assert_eq!(compact(&Host::Int(42)), "42");
    assert_eq!(compact(&Host::Byte(-3)), "-3");
    assert_eq!(compact(&Host::Long(i64::MIN)), "-9223372036854775808");
    assert_eq!(compact(&Host::Float(1.0)), "1.0");
    assert_eq!(compact(&Host::Double(2.5)), "2.5");
    assert_eq!(compact(&Host::BigInteger(1 << 80)), "1208925819614629174706176");
    let decimal = Decimal::from_str("1.50").unwrap();
    assert_eq!(compact(&Host::BigDecimal(decimal)), "1.50");
}

#[test]
fn booleans_render_bare() {
    assert_eq!(compact(&Host::Bool(true)), "true");
    assert_eq!(compact(&Host::Bool(false)), "false");
}

#[test]
fn text_char_and_enum_are_quoted() {
    assert_eq!(compact(&Host::from("hi")), "\"hi\"");
    assert_eq!(compact(&Host::StringBuilder("sb".to_string())), "\"sb\"");
    assert_eq!(compact(&Host::Char('x')), "\"x\"");
    assert_eq!(compact(&Level::Medium.to_host()), "\"Medium\"");
}

#[test]
fn text_is_verbatim_without_escaping() {
    assert_eq!(compact(&Host::from("a\"b")), "\"a\"b\"");
}

#[test]
fn escaping_covers_quote_backslash_and_tab() {
    let options = Options::default().escape_special_chars(true);
    let host = Host::from("a\"b\\c\td");
    assert_eq!(serialize(&host, &options).unwrap(), r#""a\"b\\c\td""#);
}

#[test]
fn dates_use_the_configured_pattern() {
    let host = Host::Date(at(2024, 3, 5, 13, 4, 9));
    assert_eq!(compact(&host), "\"2024-03-05 13:04:09\"");

    let options = Options::default().date_format("dd/MM/yyyy");
    assert_eq!(serialize(&host, &options).unwrap(), "\"05/03/2024\"");
}

// ============================================================================
// Null handling
// ============================================================================

#[test]
fn top_level_null_is_absent_when_ignored() {
    assert_eq!(serialize(&Host::Null, &Options::default()), None);
    let options = Options::default().ignore_null(false);
    assert_eq!(serialize(&Host::Null, &options).as_deref(), Some("null"));
}

#[test]
fn null_elements_and_entries_are_skipped() {
    let list = Host::Collection([Host::Int(1), Host::Null, Host::Int(2)].into_iter().collect());
    let map: HostMap = [("a", Host::Int(1)), ("b", Host::Null)].into_iter().collect();

    assert_eq!(compact(&list), "[1,2]");
    assert_eq!(compact(&Host::Map(map.clone())), r#"{"a":1}"#);

    let options = Options::default().ignore_null(false);
    assert_eq!(serialize(&list, &options).unwrap(), "[1,null,2]");
    assert_eq!(serialize(&Host::Map(map), &options).unwrap(), r#"{"a":1,"b":null}"#);
}

#[test]
fn container_of_only_nulls_is_empty() {
    let list = Host::Array(vec![Host::Null, Host::Null]);
    assert_eq!(compact(&list), "[]");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn empty_containers() {
    let pretty = Options::default().pretty(2);
    for host in [
        Host::Array(vec![]),
        Host::Collection(Collection::default()),
        Host::Map(HostMap::from_iter(Vec::<(String, Host)>::new())),
    ] {
        let expected = if matches!(host, Host::Map(_)) { "{}" } else { "[]" };
        assert_eq!(compact(&host), expected);
        assert_eq!(serialize(&host, &pretty).unwrap(), format!("{expected}\n"));
    }
}

#[test]
fn sets_render_in_their_own_order() {
    let mut tree = Collection::construct(zson_core::CollectionClass::TreeSet).unwrap();
    for n in [3, 1, 2, 3] {
        tree.add(Host::Int(n));
    }
    assert_eq!(compact(&Host::Collection(tree)), "[1,2,3]");
}

#[test]
fn map_keys_are_written_verbatim() {
    let map: HostMap = [("k\"ey", Host::Int(1))].into_iter().collect();
    let options = Options::default().escape_special_chars(true);
    assert_eq!(serialize(&Host::Map(map), &options).unwrap(), r#"{"k"ey":1}"#);
}

#[test]
fn pretty_printing_indents_by_depth() {
    let inner = Host::Array(vec![Host::Int(1), Host::Int(2)]);
    let map: HostMap = [("a", Host::Int(1)), ("b", inner)].into_iter().collect();
    let options = Options::default().pretty(2);
    let expected = "{\n  \"a\":1,\n  \"b\":[\n    1,\n    2\n  ]\n}\n";
    assert_eq!(serialize(&Host::Map(map), &options).unwrap(), expected);
}

#[test]
fn pretty_output_ends_with_a_line_break_only_after_containers() {
    let options = Options::default().pretty(2);
    let list = Host::Array(vec![Host::Int(1)]);
    assert_eq!(serialize(&list, &options).unwrap(), "[\n  1\n]\n");
    assert_eq!(serialize(&Host::Int(1), &options).unwrap(), "1");
    assert_eq!(serialize(&Host::from("x"), &options).unwrap(), "\"x\"");
}

#[test]
fn compact_output_has_no_whitespace() {
    let inner = Host::Array(vec![Host::Int(1), Host::Int(2)]);
    let map: HostMap = [("a", Host::Int(1)), ("b", inner)].into_iter().collect();
    assert_eq!(compact(&Host::Map(map)), r#"{"a":1,"b":[1,2]}"#);
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn record_walks_own_fields_then_parents() {
    let host = Host::Record(rex());
    assert_eq!(compact(&host), r#"{"breed":"lab","id":7,"name":"Rex","legs":4}"#);
}

#[test]
fn transient_and_static_fields_are_not_written() {
    let text = compact(&Host::Record(rex()));
    assert!(!text.contains("cache"));
    assert!(!text.contains("COUNT"));
}

#[test]
fn ignore_parent_attributes_keeps_only_own_fields() {
    let options = Options::default().ignore_parent_attributes(true);
    let text = serialize(&Host::Record(rex()), &options).unwrap();
    assert_eq!(text, r#"{"breed":"lab","id":7}"#);
}

#[test]
fn opaque_classes_stop_the_walk() {
    let parent_opaque = Options::default().opaque_class("Animal");
    assert_eq!(
        serialize(&Host::Record(rex()), &parent_opaque).unwrap(),
        r#"{"breed":"lab","id":7}"#
    );

    let own_opaque = Options::default().opaque_class("Dog");
    assert_eq!(serialize(&Host::Record(rex()), &own_opaque).unwrap(), "{}");
}

#[test]
fn fresh_record_writes_defaults_and_skips_nulls() {
    let host = Host::Record(Record::new(&DOG));
    assert_eq!(compact(&host), r#"{"id":0,"legs":0}"#);

    let options = Options::default().ignore_null(false);
    assert_eq!(
        serialize(&host, &options).unwrap(),
        r#"{"breed":null,"id":0,"name":null,"legs":0}"#
    );
}

#[test]
fn typed_record_serializes_in_declaration_order() {
    let text = to_string(&ann()).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"name":"Ann","age":41,"tags":["admin","ops"],"#,
            r#""scores":{"go":3,"rust":9},"level":"High","born":"1983-07-14 06:30:00"}"#
        )
    );
}

#[test]
fn typed_record_pretty() {
    let mut person = ann();
    person.tags.clear();
    person.scores.clear();
    person.born = None;
    let text = to_string_with(&person, &Options::default().pretty(4)).unwrap();
    let expected = concat!(
        "{\n",
        "    \"name\":\"Ann\",\n",
        "    \"age\":41,\n",
        "    \"tags\":[],\n",
        "    \"scores\":{},\n",
        "    \"level\":\"High\"\n",
        "}\n"
    );
    assert_eq!(text, expected);
}

#[test]
fn compact_record_output_is_valid_json() {
    let text = to_string(&ann()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["scores"]["rust"], 9);
    assert_eq!(json["tags"][1], "ops");
}

// ============================================================================
// Handler selection
// ============================================================================

#[test]
fn handler_order_is_fixed() {
    let options = Options::default();
    let pick = |host: &Host| SerializeHandler::select(host, &options);
    assert_eq!(pick(&Host::Int(1)), Some(SerializeHandler::BoolNumber));
    assert_eq!(pick(&Host::Char('c')), Some(SerializeHandler::TextEnum));
    assert_eq!(pick(&Host::Date(at(2020, 1, 1, 0, 0, 0))), Some(SerializeHandler::Date));
    assert_eq!(pick(&Host::Array(vec![])), Some(SerializeHandler::Sequence));
    assert_eq!(pick(&Host::Record(rex())), Some(SerializeHandler::Object));
    assert_eq!(pick(&Host::Null), None);

    let keep_nulls = Options::default().ignore_null(false);
    assert_eq!(
        SerializeHandler::select(&Host::Null, &keep_nulls),
        Some(SerializeHandler::Null)
    );
}
