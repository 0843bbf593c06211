use parson_core::{parse, parse_with, stringify, HostValue, ObjectType, ParseOptions};

/// Assert that JSON → host (hash-table objects) → JSON reproduces the same
/// JSON value.
fn assert_roundtrip(json: &str) {
    let opts = ParseOptions::default().with_object_type(ObjectType::HashTable);
    let host = parse_with(json, &opts).expect("parse failed");
    let back = stringify(&host).expect("stringify failed");
    let original: serde_json::Value = serde_json::from_str(json).unwrap();
    let roundtripped: serde_json::Value = serde_json::from_str(&back).unwrap();
    assert_eq!(
        original, roundtripped,
        "Roundtrip failed:\n  input JSON:  {json}\n  host value:  {host}\n  output JSON: {back}"
    );
}

/// Assert that JSON → host → JSON produces exactly `expected`.
fn assert_converts(json: &str, expected: &str) {
    let opts = ParseOptions::default().with_object_type(ObjectType::HashTable);
    let host = parse_with(json, &opts).expect("parse failed");
    assert_eq!(stringify(&host).unwrap(), expected, "input JSON: {json}");
}

// ============================================================================
// Primitive Roundtrips
// ============================================================================

#[test]
fn roundtrip_null() {
    assert_roundtrip("null");
}

#[test]
fn roundtrip_true() {
    assert_roundtrip("true");
}

#[test]
fn roundtrip_integer() {
    assert_roundtrip("42");
}

#[test]
fn roundtrip_negative_integer() {
    assert_roundtrip("-7");
}

#[test]
fn roundtrip_float() {
    assert_roundtrip("3.5");
}

#[test]
fn roundtrip_small_float() {
    assert_roundtrip("1.5e-10");
}

#[test]
fn roundtrip_string() {
    assert_roundtrip(r#""hello""#);
}

#[test]
fn roundtrip_empty_string() {
    assert_roundtrip(r#""""#);
}

#[test]
fn roundtrip_string_with_escapes() {
    assert_roundtrip(r#""line1\nline2\t\"q\" \\ \b\f\r""#);
}

#[test]
fn roundtrip_unicode_escape_sequence() {
    // \u escapes are decoded on parse and emitted as raw UTF-8.
    assert_converts(r#""\u00e9\u4f60""#, "\"\u{e9}\u{4f60}\"");
}

// ============================================================================
// Lossy conversions
// ============================================================================

#[test]
fn false_becomes_null() {
    assert_converts("false", "null");
    assert_converts(r#"{"ok":false}"#, r#"{"ok":null}"#);
}

#[test]
fn integral_float_becomes_integer() {
    assert_converts("2.0", "2");
    assert_converts("[1.0,1.5]", "[1,1.5]");
}

#[test]
fn whitespace_is_dropped() {
    assert_converts("{ \"a\" : [ 1 , 2 ] }", r#"{"a":[1,2]}"#);
}

#[test]
fn alist_result_cannot_be_stringified() {
    // Objects parse to association lists by default, which have no JSON
    // spelling of their own.
    let host = parse(r#"{"a":1}"#);
    assert!(matches!(host, HostValue::Alist(_)));
    assert!(stringify(&host).is_err());
}

// ============================================================================
// Object Roundtrips
// ============================================================================

#[test]
fn roundtrip_flat_object() {
    assert_roundtrip(r#"{"name":"Alice","age":30,"active":true}"#);
}

#[test]
fn roundtrip_object_with_null() {
    assert_roundtrip(r#"{"name":"Alice","email":null}"#);
}

#[test]
fn roundtrip_nested_object() {
    assert_roundtrip(r#"{"server":{"host":"localhost","port":8080}}"#);
}

#[test]
fn roundtrip_empty_object() {
    assert_roundtrip("{}");
}

#[test]
fn roundtrip_nested_empty_object() {
    assert_roundtrip(r#"{"meta":{}}"#);
}

#[test]
fn roundtrip_key_order_preserved() {
    assert_converts(r#"{"z":1,"a":2,"m":3}"#, r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn roundtrip_duplicate_keys_preserved() {
    assert_converts(r#"{"a":1,"a":2}"#, r#"{"a":1,"a":2}"#);
}

#[test]
fn roundtrip_quoted_key() {
    assert_roundtrip(r#"{"my key":"value","with\"quote":1}"#);
}

// ============================================================================
// Array Roundtrips
// ============================================================================

#[test]
fn roundtrip_array() {
    assert_roundtrip("[1,2,3]");
}

#[test]
fn roundtrip_empty_array() {
    assert_roundtrip("[]");
}

#[test]
fn roundtrip_nested_arrays() {
    assert_roundtrip("[[1,2],[3,[4,[]]]]");
}

#[test]
fn roundtrip_array_of_objects() {
    assert_roundtrip(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#);
}

#[test]
fn roundtrip_realistic_payload() {
    assert_roundtrip(
        r#"{"kind":"event-list","items":[{"id":"e1","summary":"Standup","start":{"dateTime":"2026-02-17T09:00:00-08:00"},"attendees":[{"email":"a@example.com","optional":null}],"reminders":{"useDefault":true}}],"nextSyncToken":"abc=="}"#,
    );
}

// ============================================================================
// Host → JSON → host
// ============================================================================

#[test]
fn host_roundtrip_vector_of_atoms() {
    let value = HostValue::vector([
        HostValue::Nil,
        HostValue::True,
        HostValue::Integer(i64::MIN),
        HostValue::string("x\ny"),
        HostValue::vector([]),
    ]);
    assert_eq!(parse(&stringify(&value).unwrap()), value);
}

#[test]
fn host_roundtrip_string_with_raw_control_character() {
    let value = HostValue::string("a\u{1}b");
    let json = stringify(&value).unwrap();
    assert_eq!(json.as_bytes(), [b'"', b'a', 1, b'b', b'"']);
    assert_eq!(parse(&json), value);
}

#[test]
fn host_roundtrip_every_control_character() {
    let text: String = (0u8..0x20).map(char::from).collect();
    let value = HostValue::vector([HostValue::string(text.as_str())]);
    assert_eq!(parse(&stringify(&value).unwrap()), value);
}
