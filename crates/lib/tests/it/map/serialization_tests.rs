//! JSON materialization and serde tests

use valmap::{JsonFormat, Map, Value};

use crate::helpers::*;

#[test]
fn test_to_array_nested() {
    let inner = texts(&["x", "y"]);
    let map = Map::of([Value::from(1), Value::from(inner), Value::from(vec![true, false])]);
    assert_eq!(map.to_array(), serde_json::json!([1, ["x", "y"], [true, false]]));
}

#[test]
fn test_to_array_round_trips_plain_structure() {
    let source = serde_json::json!({
        "name": "valmap",
        "tags": ["a", "b"],
        "nested": {"depth": 2, "items": [1, 2.5, null, {"k": false}]}
    });
    let map = Map::from(Value::from(source.clone()));
    assert_eq!(map.to_array(), source);
}

#[test]
fn test_to_json() {
    let map = texts(&["a", "b"]);
    assert_eq!(map.to_json(JsonFormat::Compact).unwrap(), r#"["a","b"]"#);
    assert_eq!(map.to_string(), "a,b");
}

#[test]
fn test_to_json_sparse_container() {
    let mut map = ints(&[1, 2, 3]);
    map.delete(0);
    assert_eq!(map.to_json(JsonFormat::Compact).unwrap(), r#"{"1":2,"2":3}"#);
}

#[test]
fn test_to_json_encoding_error() {
    let map = Map::of([Value::from(1), Value::Float(f64::INFINITY)]);
    let err = map.to_json(JsonFormat::Compact).unwrap_err();
    assert!(err.is_encoding_error());
    assert!(err.to_string().starts_with("JSON encoding failed"));
}

#[test]
fn test_serde_round_trip_through_json() {
    let map = json_map(r#"{"a": [1, {"b": "c"}], "d": null}"#);
    let text = serde_json::to_string(&map).unwrap();
    let back: Map = serde_json::from_str(&text).unwrap();
    assert_eq!(back, map);
}

#[test]
fn test_parse_strict_rejects_malformed() {
    let err = Map::parse_strict("[1, 2").unwrap_err();
    assert!(err.is_parse_error());
}

#[test]
fn test_parse_lenient_wraps_text() {
    let map = Map::parse("hello");
    assert_eq!(map.to_array(), serde_json::json!(["hello"]));
}
