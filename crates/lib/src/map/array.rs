//! Array-style search, projection and iteration over a [`Map`].
//!
//! Everything here leaves the receiver untouched and, where a container is
//! returned, returns a new one.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use tracing::trace;

use super::Map;
use super::index::{resolve_bound, resolve_from, resolve_point, resolve_upto};
use crate::key::Key;
use crate::value::{Value, sort_cmp, total_float_cmp};

/// How many levels of nesting [`Map::flat`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Remove up to this many levels
    Finite(usize),
    /// Remove every level
    Infinite,
}

impl Depth {
    /// Depth available one level further down, or `None` when exhausted.
    fn descend(self) -> Option<Depth> {
        match self {
            Depth::Finite(0) => None,
            Depth::Finite(n) => Some(Depth::Finite(n - 1)),
            Depth::Infinite => Some(Depth::Infinite),
        }
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Finite(1)
    }
}

impl From<usize> for Depth {
    fn from(levels: usize) -> Self {
        Depth::Finite(levels)
    }
}

/// Ordering used by [`Map::sort_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Type-ranked comparison that coerces within a rank, see [`sort_cmp`]
    #[default]
    Regular,
    /// Compare numeric readings; non-numeric values read as zero, `NaN` sorts last
    Numeric,
    /// Compare string renderings
    Text,
}

impl SortMode {
    fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            SortMode::Regular => sort_cmp(a, b),
            SortMode::Numeric => {
                total_float_cmp(a.numeric().unwrap_or(0.0), b.numeric().unwrap_or(0.0))
            }
            SortMode::Text => a.to_string().cmp(&b.to_string()),
        }
    }
}

impl Map {
    /// Returns the value at a possibly negative index.
    ///
    /// Negative indices count back from the end. The resolved index is matched
    /// against sequence keys, so sparse containers may have no value there.
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// let map = Map::of([5, 12, 8]);
    /// assert_eq!(map.at(-1), Some(&Value::Int(8)));
    /// assert_eq!(map.at(-4), None);
    /// ```
    pub fn at(&self, index: i64) -> Option<&Value> {
        let resolved = resolve_point(index, self.len())?;
        self.items.get(&Key::Index(resolved))
    }

    /// Determines whether the container holds `element` at or after `from_index`.
    ///
    /// Matching is strict, except that a `NaN` element matches any `NaN` entry.
    /// A composite element asks whether every one of its values is held.
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// let map = Map::of([Value::from(1), Value::from(2), Value::Float(f64::NAN)]);
    /// assert!(map.includes(&Value::Float(f64::NAN), 0));
    /// assert!(!map.includes(&Value::from("1"), 0));
    /// assert!(map.includes(&Value::from(vec![1, 2]), 0));
    /// ```
    pub fn includes(&self, element: &Value, from_index: i64) -> bool {
        let Some(from) = resolve_from(from_index, self.len()) else {
            return false;
        };

        if let Some(mut wanted) = element.composite_values() {
            return wanted.all(|item| self.includes(item, from));
        }

        self.items
            .iter()
            .filter(|(key, _)| key.at_or_after(from))
            .any(|(_, value)| element.same_value(value))
    }

    /// Returns the key of the first entry at or after `from_index` strictly equal
    /// to `element`, or `None`.
    pub fn index_of(&self, element: &Value, from_index: i64) -> Option<&Key> {
        if self.is_empty() {
            return None;
        }
        let from = resolve_from(from_index, self.len())?;
        self.items
            .iter()
            .find(|&(key, value)| key.at_or_after(from) && value == element)
            .map(|(key, _)| key)
    }

    /// Returns the key of the last entry at or before `from_index` strictly equal
    /// to `element`, or `None`. `None` for `from_index` searches the whole container.
    ///
    /// ```
    /// # use valmap::{Key, Map, Value};
    /// let map = Map::of([2, 5, 9, 2]);
    /// assert_eq!(map.last_index_of(&Value::from(2), None), Some(&Key::Index(3)));
    /// assert_eq!(map.last_index_of(&Value::from(2), Some(-2)), Some(&Key::Index(0)));
    /// assert_eq!(map.last_index_of(&Value::from(7), None), None);
    /// ```
    pub fn last_index_of(&self, element: &Value, from_index: Option<i64>) -> Option<&Key> {
        let upto = resolve_upto(from_index.unwrap_or(-1), self.len())?;
        self.items
            .iter()
            .rev()
            .find(|&(key, value)| key.at_or_before(upto) && value == element)
            .map(|(key, _)| key)
    }

    /// Returns a copy with the entries in `[start, end)` set to `value`.
    ///
    /// Both bounds resolve like any other index; omitted bounds span the whole
    /// container. The receiver is not modified.
    ///
    /// ```
    /// # use valmap::Map;
    /// let map = Map::of([1, 2, 3, 4, 5]);
    /// assert_eq!(map.fill(4, Some(-3), Some(-2)).join(","), "1,2,4,4,5");
    /// assert_eq!(map.join(","), "1,2,3,4,5");
    /// ```
    pub fn fill(&self, value: impl Into<Value>, start: Option<i64>, end: Option<i64>) -> Map {
        let value = value.into();
        let len = self.len();
        let from = resolve_bound(start.unwrap_or(0), len);
        let to = end.map_or(len, |e| resolve_bound(e, len));

        let mut result = self.clone();
        for i in from..to {
            result.set(i, value.clone());
        }
        result
    }

    /// Applies `f` to every entry, preserving keys.
    pub fn map<F>(&self, mut f: F) -> Map
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.items
            .iter()
            .map(|(key, value)| (key.clone(), f(value, key)))
            .collect()
    }

    /// Keeps entries for which `predicate` holds. `reset_keys` renumbers the
    /// survivors from zero instead of keeping their keys.
    pub fn filter<F>(&self, mut predicate: F, reset_keys: bool) -> Map
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let kept = self
            .items
            .iter()
            .filter(|&(key, value)| predicate(value, key))
            .map(|(key, value)| (key.clone(), value.clone()));
        if reset_keys {
            kept.map(|(_, value)| value).collect()
        } else {
            kept.collect()
        }
    }

    /// [`Map::filter`] with [`Value::is_filter_truthy`] as the predicate.
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// let map = Map::of([
    ///     Value::from(1), Value::from("foo"), Value::Null, Value::from(3),
    ///     Value::from(false), Value::from(""), Value::from(0), Value::List(vec![]),
    /// ]);
    /// assert_eq!(map.filter_truthy(true).join(","), "1,foo,3");
    /// ```
    pub fn filter_truthy(&self, reset_keys: bool) -> Map {
        self.filter(|value, _| value.is_filter_truthy(), reset_keys)
    }

    /// Concatenates nested lists and containers into a dense container, down to
    /// `depth` levels. Scalars pass through unchanged.
    ///
    /// ```
    /// # use valmap::{Depth, Map, Value};
    /// let nested = Map::of([Value::from(1), Value::from(vec![
    ///     Value::from(2), Value::from(vec![Value::from(3), Value::from(vec![4])]),
    /// ])]);
    /// assert_eq!(nested.flat(1).len(), 3);
    /// assert_eq!(nested.flat(Depth::Infinite).join(","), "1,2,3,4");
    /// ```
    pub fn flat(&self, depth: impl Into<Depth>) -> Map {
        let mut out = Vec::with_capacity(self.len());
        flatten_into(&mut out, self.items.values(), depth.into());
        out.into_iter().collect()
    }

    /// [`Map::map`] followed by one level of [`Map::flat`].
    pub fn flat_map<F>(&self, f: F) -> Map
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.map(f).flat(1)
    }

    /// Returns the entries in reverse order.
    ///
    /// Without `preserve_keys`, sequence keys are renumbered from zero and named
    /// keys are kept.
    pub fn reverse(&self, preserve_keys: bool) -> Map {
        let reversed = self
            .items
            .iter()
            .rev()
            .map(|(key, value)| (key.clone(), value.clone()));
        if preserve_keys {
            reversed.collect()
        } else {
            let mut out = Map::new();
            out.replace_renumbered(reversed);
            out
        }
    }

    /// Returns the entries in `[start, end)` with their keys. `None` for `end`
    /// runs through the last entry.
    ///
    /// ```
    /// # use valmap::Map;
    /// let animals = Map::of(["ant", "bison", "camel", "duck", "elephant"]);
    /// assert_eq!(animals.slice(2, None).join(","), "camel,duck,elephant");
    /// assert_eq!(animals.slice(2, Some(4)).join(","), "camel,duck");
    /// assert_eq!(animals.slice(-2, None).join(","), "duck,elephant");
    /// assert_eq!(animals.slice(2, Some(-1)).join(","), "camel,duck");
    /// ```
    pub fn slice(&self, start: i64, end: Option<i64>) -> Map {
        if end == Some(start) {
            return Map::new();
        }
        let len = self.len();
        let from = resolve_bound(start, len);
        let to = end.map_or(len, |e| resolve_bound(e, len));
        self.items
            .iter()
            .skip(from)
            .take(to.saturating_sub(from))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Stable sort with the default ordering; the result is re-keyed densely.
    pub fn sort(&self) -> Map {
        self.sort_with(SortMode::Regular)
    }

    /// Stable sort with a sort mode; the result is re-keyed densely.
    pub fn sort_with(&self, mode: SortMode) -> Map {
        self.sort_by(|a, b| mode.compare(a, b))
    }

    /// Stable sort with a three-way comparator; the result is re-keyed densely.
    ///
    /// `compare` must be a total order. The standard library sort may panic when it
    /// detects one that is not.
    ///
    /// ```
    /// # use valmap::Map;
    /// let map = Map::of([3, 1, 2]);
    /// assert_eq!(map.sort_by(|a, b| b.as_int().cmp(&a.as_int())).join(","), "3,2,1");
    /// ```
    pub fn sort_by<F>(&self, mut compare: F) -> Map
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut values: Vec<Value> = self.items.values().cloned().collect();
        values.sort_by(|a, b| compare(a, b));
        values.into_iter().collect()
    }

    /// Left fold over the values in storage order.
    pub fn reduce<T, F>(&self, initial: T, f: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        self.items.values().fold(initial, f)
    }

    /// Right fold: the values in reverse storage order.
    pub fn reduce_right<T, F>(&self, initial: T, f: F) -> T
    where
        F: FnMut(T, &Value) -> T,
    {
        self.items.values().rev().fold(initial, f)
    }

    /// Renders every value as a string and joins them with `separator`.
    ///
    /// Booleans render as `true`/`false`, null and empty composites as the empty
    /// string, and nested composites flatten fully and join with `,` whatever the
    /// outer separator.
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// let elements = Map::of([
    ///     Value::from("Fire"), Value::List(vec![]), Value::from("Water"), Value::Null,
    /// ]);
    /// assert_eq!(elements.join(","), "Fire,,Water,");
    /// ```
    pub fn join(&self, separator: &str) -> String {
        self.items
            .values()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Returns a new container of the receiver's values followed by each argument.
    ///
    /// Lists and containers contribute their values one by one; other values are
    /// appended whole.
    pub fn concat<I, T>(&self, args: I) -> Map
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut result = self.values();
        for arg in args {
            match arg.into() {
                Value::List(items) => result.extend(items),
                Value::Map(map) => result.extend(map.into_iter().map(|(_, v)| v)),
                scalar => {
                    result.push(scalar);
                }
            }
        }
        result
    }

    /// Visits entries in storage order until `f` breaks.
    ///
    /// ```
    /// # use std::ops::ControlFlow;
    /// # use valmap::{Map, Value};
    /// let map = Map::of([Value::from(2), Value::from(5), Value::from(""), Value::from(9)]);
    /// let mut doubled = Vec::new();
    /// map.for_each(|value, _| match value.as_int() {
    ///     Some(n) => {
    ///         doubled.push(n * 2);
    ///         ControlFlow::Continue(())
    ///     }
    ///     None => ControlFlow::Break(()),
    /// });
    /// assert_eq!(doubled, vec![4, 10]);
    /// ```
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&Value, &Key) -> ControlFlow<()>,
    {
        for (key, value) in &self.items {
            if f(value, key).is_break() {
                trace!(key = %key, "for_each stopped early");
                break;
            }
        }
        self
    }

    /// Returns true if `predicate` holds for every entry
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.items.iter().all(|(key, value)| predicate(value, key))
    }

    /// Returns true if `predicate` holds for at least one entry
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.items.iter().any(|(key, value)| predicate(value, key))
    }

    /// Returns the first value satisfying `predicate`
    pub fn find<F>(&self, mut predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.items
            .iter()
            .find(|&(key, value)| predicate(value, key))
            .map(|(_, value)| value)
    }

    /// Returns the key of the first entry satisfying `predicate`
    pub fn find_index<F>(&self, mut predicate: F) -> Option<&Key>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.items
            .iter()
            .find(|&(key, value)| predicate(value, key))
            .map(|(key, _)| key)
    }

    /// Returns a dense container holding the keys as values.
    pub fn keys(&self) -> Map {
        self.items.keys().cloned().map(Value::from).collect()
    }

    /// Returns a dense container holding the values.
    pub fn values(&self) -> Map {
        self.items.values().cloned().collect()
    }
}

fn flatten_into<'a>(out: &mut Vec<Value>, values: impl Iterator<Item = &'a Value>, depth: Depth) {
    for value in values {
        match (value.composite_values(), depth.descend()) {
            (Some(inner), Some(next)) => flatten_into(out, inner, next),
            _ => out.push(value.clone()),
        }
    }
}

impl std::fmt::Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.join(","))
    }
}
