//! Construction and coercion tests

use valmap::{Key, Map, MapError, Value};

use crate::helpers::*;

#[test]
fn test_from_string_explodes_characters() {
    let map = Map::from_source(Value::from("foo")).unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.to_array(), serde_json::json!(["f", "o", "o"]));
    assert_dense(&map);
}

#[test]
fn test_from_empty_string() {
    let map = Map::from_source(Value::from("")).unwrap();
    assert_eq!(map.to_array(), serde_json::json!([""]));

    let quoted = Map::from_source(Value::from("\"\"")).unwrap();
    assert_eq!(quoted.to_array(), serde_json::json!([""]));
}

#[test]
fn test_from_json_text() {
    let map = Map::from_source(Value::from(r#"["a", "b"]"#)).unwrap();
    assert_eq!(map.to_array(), serde_json::json!(["a", "b"]));

    let object = Map::from_source(Value::from(r#"{"a": "b"}"#)).unwrap();
    assert_eq!(object.to_array(), serde_json::json!({"a": "b"}));
    assert_eq!(keys_of(&object), vec![Key::from("a")]);
}

#[test]
fn test_from_json_scalar_text_explodes() {
    // Valid JSON that is not array-shaped falls back to characters
    let map = Map::from_source(Value::from("123")).unwrap();
    assert_eq!(map.join(","), "1,2,3");
}

#[test]
fn test_from_list_and_map() {
    let list = Value::from(vec!["foo", "bar", "baz", "foo"]);
    let map = Map::from_source(list).unwrap();
    assert_eq!(map.to_array(), serde_json::json!(["foo", "bar", "baz", "foo"]));

    let original = texts(&["foo", "window"]);
    let again = Map::from_source(Value::from(original.clone())).unwrap();
    assert_eq!(again, original);
}

#[test]
fn test_from_nested_map_values_and_keys() {
    let map = json_map(r#"[["1", "a"], ["2", "b"]]"#);
    let again = Map::from_source(Value::from(map.values())).unwrap();
    assert_eq!(again.to_array(), serde_json::json!([["1", "a"], ["2", "b"]]));
    assert_eq!(map.keys().to_array(), serde_json::json!([0, 1]));
}

#[test]
fn test_from_range() {
    let map = Map::from_source(Value::from(5)).unwrap();
    assert_ints(&map, &[0, 1, 2, 3, 4]);
    assert!(Map::from_source(Value::from(0)).unwrap().is_empty());
}

#[test]
fn test_from_with_mapper() {
    let map = Map::from_source_with(Value::from(vec![1, 2, 3]), |value, _| {
        Value::from(value.as_int().unwrap_or(0) * 2)
    })
    .unwrap();
    assert_ints(&map, &[2, 4, 6]);
}

#[test]
fn test_from_unsupported_source_fails() {
    let err = Map::from_source(Value::Null).unwrap_err();
    assert!(matches!(
        err,
        MapError::TypeMismatch { ref actual, .. } if actual == "null"
    ));
    assert!(Map::from_source(Value::Float(1.5)).unwrap_err().is_type_error());
}

#[test]
fn test_of_keeps_arguments_positionally() {
    let nested = json_map(r#"{"c": 1, "": "d"}"#);
    let map = Map::of([
        Value::from("a"),
        Value::from("b"),
        Value::from(nested),
        Value::Null,
    ]);
    assert_eq!(
        map.to_array(),
        serde_json::json!(["a", "b", {"c": 1, "": "d"}, null])
    );
    assert_eq!(
        map.get(2).and_then(Value::as_map).and_then(|m| m.get(Key::absent())),
        Some(&Value::from("d"))
    );
}

#[test]
fn test_is_array_and_is_map() {
    assert!(Map::is_array(&Value::from(vec![1, 2, 3])));
    assert!(!Map::is_array(&Value::from(ints(&[1, 2, 3]))));
    assert!(!Map::is_array(&Value::from("foobar")));
    assert!(!Map::is_array(&Value::Null));

    assert!(Map::is_map(&Value::from(ints(&[1, 2, 3]))));
    assert!(!Map::is_map(&Value::from(vec![1, 2, 3])));
    assert!(!Map::is_map(&Value::Null));
}

#[test]
fn test_parse_via_from_str() {
    let map: Map = "[1, 2]".parse().unwrap();
    assert_ints(&map, &[1, 2]);

    let err = "not json".parse::<Map>().unwrap_err();
    assert!(err.is_parse_error());
    assert!(!err.is_encoding_error());
    assert_eq!(err.module(), "map");
    assert!(matches!(err, valmap::Error::Map(MapError::Parse { .. })));
}
