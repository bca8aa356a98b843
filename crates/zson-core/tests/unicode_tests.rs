/// Escape codec tests, including the exact boundaries of the rewritten range.
use zson_core::unicode::{decode, encode, WIDE_CHARS};
use zson_core::{serialize, Host, Options};

// ============================================================================
// encode
// ============================================================================

#[test]
fn encode_cjk_text() {
    assert_eq!(encode("中文"), "\\u4e2d\\u6587");
    assert_eq!(encode("a中b"), "a\\u4e2db");
}

#[test]
fn encode_range_lower_boundary() {
    assert_eq!(encode("\u{4dff}"), "\u{4dff}");
    assert_eq!(encode("\u{4e00}"), "\\u4e00");
}

#[test]
fn encode_range_upper_boundary() {
    // the range is applied to UTF-16 units and its upper bound, the decimal
    // value 171941, lies past every unit, so the whole tail of the BMP is rewritten
    assert_eq!(encode("\u{9fa6}"), "\\u9fa6");
    assert_eq!(encode("\u{ffff}"), "\\uffff");
    assert_eq!(*WIDE_CHARS.end(), 171_941);
}

#[test]
fn encode_astral_characters_as_surrogate_pairs() {
    assert_eq!(encode("\u{29fa5}"), "\\ud867\\udfa5");
    assert_eq!(encode("smile \u{1f600}"), "smile \\ud83d\\ude00");
}

#[test]
fn encode_uses_lowercase_hex_without_padding() {
    assert_eq!(encode("\u{abcd}"), "\\uabcd");
}

#[test]
fn encode_leaves_other_text_alone() {
    assert_eq!(encode("plain ascii, été"), "plain ascii, été");
}

// ============================================================================
// decode
// ============================================================================

#[test]
fn decode_four_digit_escapes() {
    assert_eq!(decode("\\u4e2d\\u6587"), "中文");
    assert_eq!(decode("x\\u0041y"), "xAy");
}

#[test]
fn decode_rescans_after_each_replacement() {
    // \u005c is a backslash, which then starts the next escape
    assert_eq!(decode("\\u005cu4e2d"), "中");
}

#[test]
fn decode_stops_when_fewer_than_six_chars_remain() {
    assert_eq!(decode("x\\u12"), "x\\u12");
    assert_eq!(decode("\\u0041\\u12"), "A\\u12");
}

#[test]
fn decode_inverts_encode_for_four_digit_code_points() {
    let text = "混合 text 中文";
    assert_eq!(decode(&encode(text)), text);
}

#[test]
fn decode_joins_surrogate_pairs() {
    assert_eq!(decode("\\ud83d\\ude00"), "\u{1f600}");
    let text = "smile \u{1f600} \u{29fa5}";
    assert_eq!(decode(&encode(text)), text);
}

// ============================================================================
// Serializer integration
// ============================================================================

#[test]
fn unicode_output_applies_to_finished_text() {
    let options = Options::default().unicode_output(true);
    let host = Host::Collection([Host::from("中"), Host::from("ok")].into_iter().collect());
    assert_eq!(serialize(&host, &options).unwrap(), r#"["\u4e2d","ok"]"#);
}

#[test]
fn unicode_output_keeps_astral_characters_intact() {
    let options = Options::default().unicode_output(true);
    let text = serialize(&Host::from("smile \u{1f600}"), &options).unwrap();
    assert_eq!(text, r#""smile \ud83d\ude00""#);
    assert_eq!(decode(&text), "\"smile \u{1f600}\"");
}

#[test]
fn unicode_output_is_off_by_default() {
    let host = Host::from("中");
    assert_eq!(serialize(&host, &Options::default()).unwrap(), "\"中\"");
}
