//! Index resolution, membership and search tests

use std::ops::ControlFlow;

use valmap::{Key, Map, Value};

use crate::helpers::*;

// ===== AT =====

#[test]
fn test_at_resolves_negative_indices() {
    let map = ints(&[5, 12, 8, 130, 44]);
    assert_eq!(map.at(2), Some(&Value::from(8)));
    assert_eq!(map.at(-2), Some(&Value::from(130)));
    assert_eq!(map.at(-5), Some(&Value::from(5)));
    assert_eq!(map.at(-6), None);
    assert_eq!(map.at(5), None);
    assert_eq!(Map::new().at(0), None);
}

// ===== INCLUDES =====

#[test]
fn test_includes() {
    assert!(ints(&[1, 2, 3]).includes(&Value::from(2), 0));
    assert!(!ints(&[1, 2, 3]).includes(&Value::from(4), 0));
    assert!(!ints(&[1, 2, 3]).includes(&Value::from(3), 3));
    assert!(ints(&[1, 2, 3]).includes(&Value::from(3), -1));
    assert!(!texts(&["a", "b", "c"]).includes(&Value::from("a"), -2));
    assert!(texts(&["a", "b", "c"]).includes(&Value::from("a"), -100));
    assert!(!texts(&["1", "2", "3"]).includes(&Value::from(3), 0));
}

#[test]
fn test_includes_nan() {
    let map = Map::of([Value::from(1), Value::from(2), Value::Float(f64::NAN)]);
    assert!(map.includes(&Value::Float(f64::NAN), 0));
    assert!(!ints(&[1, 2]).includes(&Value::Float(f64::NAN), 0));
}

#[test]
fn test_includes_past_end() {
    assert!(!ints(&[1, 2, 3]).includes(&Value::from(1), 4));
}

#[test]
fn test_includes_composite_requires_every_value() {
    let map = ints(&[1, 2, 3, 4, 5, 6, 7]);
    assert!(map.includes(&Value::from(vec![5, 7, 6]), 0));
    assert!(!map.includes(&Value::from(vec![5, 8, 7]), 0));
    assert!(map.includes(&Value::from(ints(&[1, 2])), 0));
    assert!(!map.includes(&Value::from(vec![1, 2]), 2));
}

#[test]
fn test_every_subset() {
    let is_subset = |superset: &Map, subset: &Map| {
        subset.every(|element, _| superset.includes(element, 0))
    };
    let superset = ints(&[1, 2, 3, 4, 5, 6, 7]);
    assert!(is_subset(&superset, &ints(&[5, 7, 6])));
    assert!(!is_subset(&superset, &ints(&[5, 8, 7])));
}

// ===== INDEX_OF / LAST_INDEX_OF =====

#[test]
fn test_index_of() {
    let map = texts(&["ant", "bison", "camel", "duck", "bison"]);
    assert_eq!(map.index_of(&Value::from("bison"), 0), Some(&Key::Index(1)));
    assert_eq!(map.index_of(&Value::from("bison"), 2), Some(&Key::Index(4)));
    assert_eq!(map.index_of(&Value::from("giraffe"), 0), None);
    assert_eq!(map.index_of(&Value::from("duck"), -2), Some(&Key::Index(3)));
}

#[test]
fn test_index_of_returns_original_key() {
    let mut map = texts(&["ant", "bison"]);
    map.set("pet", "camel");
    map.push("duck").push("bison");

    assert_eq!(map.index_of(&Value::from("bison"), 0), Some(&Key::Index(1)));
    assert_eq!(map.index_of(&Value::from("camel"), 0), Some(&Key::from("pet")));
    assert_eq!(map.index_of(&Value::from("duck"), 0), Some(&Key::Index(2)));
}

#[test]
fn test_index_of_is_strict() {
    let map = Map::of([Value::from(1), Value::from("1"), Value::Float(1.0)]);
    assert_eq!(map.index_of(&Value::from("1"), 0), Some(&Key::Index(1)));
    assert_eq!(map.index_of(&Value::Float(1.0), 0), Some(&Key::Index(2)));
    assert_eq!(
        Map::of([Value::Float(f64::NAN)]).index_of(&Value::Float(f64::NAN), 0),
        None
    );
}

#[test]
fn test_last_index_of() {
    let map = ints(&[2, 5, 9, 2]);
    let two = Value::from(2);
    assert_eq!(map.last_index_of(&two, None), Some(&Key::Index(3)));
    assert_eq!(map.last_index_of(&Value::from(7), None), None);
    assert_eq!(map.last_index_of(&two, Some(3)), Some(&Key::Index(3)));
    assert_eq!(map.last_index_of(&two, Some(2)), Some(&Key::Index(0)));
    assert_eq!(map.last_index_of(&two, Some(-2)), Some(&Key::Index(0)));
    assert_eq!(map.last_index_of(&two, Some(-1)), Some(&Key::Index(3)));
    assert_eq!(map.last_index_of(&two, Some(-5)), None);
    assert_eq!(Map::new().last_index_of(&two, None), None);
}

// ===== FIND / PREDICATES =====

fn inventory() -> Map {
    json_map(
        r#"[
            {"name": "apples", "quantity": 2},
            {"name": "bananas", "quantity": 0},
            {"name": "cherries", "quantity": 5}
        ]"#,
    )
}

fn name_is(target: &'static str) -> impl Fn(&Value, &Key) -> bool {
    move |value: &Value, _: &Key| value.field(&Key::from("name")) == Some(&Value::from(target))
}

#[test]
fn test_find() {
    let found = inventory().find(name_is("cherries")).cloned();
    assert_eq!(
        found.as_ref().and_then(|v| v.field(&Key::from("quantity"))),
        Some(&Value::from(5))
    );
    assert_eq!(inventory().find(name_is("kiwi")), None);
}

#[test]
fn test_find_index() {
    assert_eq!(inventory().find_index(name_is("bananas")), Some(&Key::Index(1)));
    assert_eq!(inventory().find_index(name_is("kiwi")), None);
}

#[test]
fn test_every_and_some() {
    let big_enough = |value: &Value, _: &Key| value.as_int().is_some_and(|n| n >= 10);
    assert!(!ints(&[12, 5, 8, 130, 44]).every(big_enough));
    assert!(ints(&[12, 54, 18, 130, 44]).every(big_enough));
    assert!(ints(&[2, 5, 8, 1, 4]).some(|v, _| v.as_int().is_some_and(|n| n > 7)));
    assert!(!ints(&[2, 5, 1]).some(|v, _| v.as_int().is_some_and(|n| n > 7)));
    assert!(Map::new().every(|_, _| false));
    assert!(!Map::new().some(|_, _| true));
}

#[test]
fn test_for_each_visits_in_order() {
    let map = ints(&[2, 5, 9]);
    let mut doubled = Vec::new();
    let returned = map.for_each(|value, key| {
        doubled.push((key.clone(), value.as_int().unwrap_or(0) * 2));
        ControlFlow::Continue(())
    });
    assert_eq!(returned, &map);
    assert_eq!(
        doubled,
        vec![(Key::Index(0), 4), (Key::Index(1), 10), (Key::Index(2), 18)]
    );
}

#[test]
fn test_for_each_with_break() {
    let map = Map::of([Value::from(2), Value::from(5), Value::from(""), Value::from(9)]);
    let mut doubled = Vec::new();
    map.for_each(|value, _| match value {
        Value::Text(_) => ControlFlow::Break(()),
        other => {
            doubled.push(other.as_int().unwrap_or(0) * 2);
            ControlFlow::Continue(())
        }
    });
    assert_eq!(doubled, vec![4, 10]);
    assert_eq!(map.len(), 4);
}
