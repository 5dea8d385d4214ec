//! Map-style keyed access tests: get, set, has, delete, clear, entries, size

use valmap::{Key, Map, Value};

use crate::helpers::*;

#[test]
fn test_set_and_get() {
    let mut map = Map::new();
    map.set("bar", "foo").set(1, "foobar");

    assert_eq!(map.get("bar"), Some(&Value::from("foo")));
    assert_eq!(map.get(1), Some(&Value::from("foobar")));
    assert_eq!(map.get("baz"), None);
}

#[test]
fn test_set_existing_key_keeps_position() {
    let mut map = Map::new();
    map.set("a", 1).set("b", 2).set("a", 3);
    assert_eq!(keys_of(&map), vec![Key::from("a"), Key::from("b")]);
    assert_eq!(map.get("a"), Some(&Value::from(3)));
}

#[test]
fn test_named_numeric_keys_stay_named() {
    let mut map = Map::new();
    map.set("0", "named").set(0, "indexed");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("0"), Some(&Value::from("named")));
    assert_eq!(map.get(0), Some(&Value::from("indexed")));
}

#[test]
fn test_has() {
    let mut map = Map::new();
    map.set("bar", "foo");
    assert!(map.has("bar"));
    assert!(!map.has("baz"));
}

#[test]
fn test_delete() {
    let mut map = Map::new();
    map.set("bar", "foo").set("baz", "qux");
    assert!(map.delete("bar"));
    assert!(!map.has("bar"));
    assert!(!map.delete("bar"));
    assert_eq!(keys_of(&map), vec![Key::from("baz")]);
}

#[test]
fn test_clear() {
    let mut map = Map::new();
    map.set("bar", "baz").set(1, "foo");
    assert_eq!(map.size(), 2);
    map.clear();
    assert_eq!(map.size(), 0);
    assert!(map.is_empty());
}

#[test]
fn test_entries_in_insertion_order() {
    let mut map = Map::new();
    map.set("0", "foo").set(1, "bar");
    let entries: Vec<(Key, Value)> = map.entries().map(|(k, v)| (k.clone(), v.clone())).collect();
    assert_eq!(
        entries,
        vec![
            (Key::from("0"), Value::from("foo")),
            (Key::Index(1), Value::from("bar")),
        ]
    );
}

#[test]
fn test_get_mut_changes_nested_value() {
    let mut map = json_map(r#"{"list": [1, 2]}"#);
    if let Some(list) = map.get_mut("list").and_then(Value::as_list_mut) {
        list.push(Value::from(3));
    }
    assert_eq!(map.to_array(), serde_json::json!({"list": [1, 2, 3]}));
}

#[test]
fn test_length_and_size_properties() {
    let map = texts(&["a", "b", "c"]);
    assert_eq!(map.length(), 3);
    assert_eq!(map.size(), 3);
    assert_eq!(map.property("length").unwrap(), 3);
    assert_eq!(map.property("size").unwrap(), 3);

    let err = map.property("foo").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Property [foo] does not exist on this collection instance."
    );
}

#[test]
fn test_iteration_by_reference_and_value() {
    let map = ints(&[1, 2]);
    let mut seen = Vec::new();
    for (key, value) in &map {
        seen.push((key.clone(), value.clone()));
    }
    let owned: Vec<(Key, Value)> = map.into_iter().collect();
    assert_eq!(seen, owned);
}

#[test]
fn test_extend_and_collect() {
    let mut map: Map = vec![Value::from(1)].into_iter().collect();
    map.extend([Value::from(2), Value::from(3)]);
    assert_ints(&map, &[1, 2, 3]);

    let chars: Map = "hey".chars().collect();
    assert_eq!(chars.join(""), "hey");
}
