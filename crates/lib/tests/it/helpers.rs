use valmap::{Key, Map, Value};

// ==========================
// TEST FACTORIES
// ==========================

/// Builds a dense container from integers
pub fn ints(values: &[i64]) -> Map {
    Map::of(values.iter().copied())
}

/// Builds a dense container from strings
pub fn texts(values: &[&str]) -> Map {
    Map::of(values.iter().copied())
}

/// Builds a container from a JSON literal, panicking on malformed test input
pub fn json_map(text: &str) -> Map {
    Map::parse_strict(text).expect("test JSON should parse")
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Keys of a container in storage order
pub fn keys_of(map: &Map) -> Vec<Key> {
    map.iter().map(|(key, _)| key.clone()).collect()
}

/// Assert that the container's values, in storage order, are the given integers
pub fn assert_ints(map: &Map, expected: &[i64]) {
    let actual: Vec<Value> = map.iter().map(|(_, value)| value.clone()).collect();
    let expected: Vec<Value> = expected.iter().copied().map(Value::from).collect();
    assert_eq!(actual, expected, "container values mismatch");
}

/// Assert that the container's keys are exactly `0..len` in order
pub fn assert_dense(map: &Map) {
    let expected: Vec<Key> = (0..map.len()).map(Key::Index).collect();
    assert_eq!(keys_of(map), expected, "container keys are not dense");
}
