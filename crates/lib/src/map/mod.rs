//! The ordered associative container.
//!
//! [`Map`] keeps an insertion-ordered mapping from [`Key`] to [`Value`]. The same
//! backing store serves two read views: entries in storage order (keys preserved)
//! and dense values (keys renumbered from zero). Operations pick the view they need,
//! so key-preserving and key-resetting transformations are both first-class.
//!
//! # Mutation Contract
//!
//! Mutability is a per-method contract:
//!
//! | Mutates the receiver | Returns a new container |
//! |---|---|
//! | `push`, `pop`, `shift`, `unshift`, `splice`, `set`, `delete`, `clear`, `copy_within` | `fill`, `map`, `filter`, `flat`, `flat_map`, `reverse`, `slice`, `sort`, `concat`, `keys`, `values` |
//!
//! # Aliasing
//!
//! Nested containers are owned by the container holding them. Inserting a value
//! moves or clones it, so a nested container is never visible from two places.
//! Mutate a nested container in place through [`Map::get_mut`].
//!
//! ```
//! # use valmap::{Map, Value};
//! let mut grid = Map::from_source(Value::from(3)).unwrap();
//! for i in 0..3 {
//!     grid.set(i, Map::from_source(Value::from(4)).unwrap().fill(1, None, None));
//! }
//! grid.get_mut(0).and_then(Value::as_map_mut).unwrap().set(0, 10);
//!
//! assert_eq!(grid.get(0).and_then(Value::as_map).and_then(|m| m.get(0)), Some(&Value::Int(10)));
//! assert_eq!(grid.get(1).and_then(Value::as_map).and_then(|m| m.get(0)), Some(&Value::Int(1)));
//! ```

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::errors::MapError;
use crate::key::Key;
use crate::value::Value;

mod array;
mod index;
mod json;

pub use array::{Depth, SortMode};
pub use json::JsonFormat;

use index::resolve_bound;

/// Ordered associative container with Array and Map semantics.
///
/// # Examples
///
/// ```
/// # use valmap::{Key, Map, Value};
/// let mut map = Map::new();
/// map.push("ant").push("bison");
/// map.set("pet", "camel");
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.get(1), Some(&Value::from("bison")));
/// assert_eq!(map.index_of(&Value::from("camel"), 0), Some(&Key::from("pet")));
/// ```
#[derive(Debug, Clone)]
pub struct Map {
    items: IndexMap<Key, Value>,
    /// Key the next appended entry receives. Never lowered by `delete`.
    /// `None` once `usize::MAX` has been used as a key.
    next_index: Option<usize>,
}

impl Default for Map {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl Map {
    /// Creates a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IndexMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Creates a container from positional values.
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// let map = Map::of(["a", "b"]);
    /// assert_eq!(map.join(","), "a,b");
    /// ```
    pub fn of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        values.into_iter().map(Into::into).collect()
    }

    /// Normalizes arbitrary input into a container.
    ///
    /// - text is parsed as JSON; an array or object becomes the container, anything
    ///   else falls back to one entry per character
    /// - a non-negative integer `n` becomes the range `0..n`
    /// - a list is taken positionally
    /// - a container is returned as-is
    ///
    /// Every other input fails with [`MapError::TypeMismatch`].
    ///
    /// ```
    /// # use valmap::{Map, Value};
    /// assert_eq!(Map::from_source(Value::from("foo")).unwrap().join("|"), "f|o|o");
    /// assert_eq!(Map::from_source(Value::from(3)).unwrap().join(","), "0,1,2");
    /// assert!(Map::from_source(Value::Null).is_err());
    /// ```
    pub fn from_source(source: Value) -> Result<Self, MapError> {
        match source {
            Value::Text(text) => Ok(Self::parse_or_explode(&text)),
            Value::Int(n) if n >= 0 => {
                trace!(n, "expanding integer source into a range");
                Ok((0..n).map(Value::Int).collect())
            }
            Value::List(items) => Ok(items.into_iter().collect()),
            Value::Map(map) => Ok(map),
            other => Err(MapError::TypeMismatch {
                expected: "iterable".to_string(),
                actual: other.type_name().to_string(),
            }),
        }
    }

    /// [`Map::from_source`] followed by [`Map::map`].
    pub fn from_source_with<F>(source: Value, mapper: F) -> Result<Self, MapError>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        Ok(Self::from_source(source)?.map(mapper))
    }

    /// Builds a container from text the way the primary constructor does.
    ///
    /// A JSON array or object becomes the container. Any other JSON value is
    /// wrapped as a single entry, and text that is not JSON is wrapped whole.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
                Self::from_json(json)
            }
            Ok(json) => {
                debug!("JSON text is not array-shaped, wrapping the decoded value");
                Self::of([Value::from(json)])
            }
            Err(e) => {
                debug!(error = %e, "text is not JSON, wrapping it whole");
                Self::of([text])
            }
        }
    }

    /// Builds a container from JSON text, propagating parse failures.
    ///
    /// The text must decode to an array or object.
    pub fn parse_strict(text: &str) -> Result<Self, MapError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| MapError::Parse {
                reason: e.to_string(),
            })?;
        match json {
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Ok(Self::from_json(json)),
            other => Err(MapError::Parse {
                reason: format!("expected a JSON array or object, found {other}"),
            }),
        }
    }

    /// JSON array or object, else one entry per character.
    fn parse_or_explode(text: &str) -> Self {
        let exploded = match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
                return Self::from_json(json);
            }
            // A JSON string literal explodes its decoded content
            Ok(serde_json::Value::String(decoded)) => decoded,
            Ok(_) => text.to_string(),
            Err(e) => {
                debug!(error = %e, "text is not JSON, exploding into characters");
                text.to_string()
            }
        };
        if exploded.is_empty() {
            return Self::of([""]);
        }
        exploded.chars().collect()
    }

    /// Converts a top-level JSON array or object; other JSON values become one entry.
    pub(crate) fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(fields) => fields
                .into_iter()
                .map(|(k, v)| (Key::Name(k), Value::from(v)))
                .collect(),
            scalar => Self::of([Value::from(scalar)]),
        }
    }

    /// Returns true if `value` is a plain sequence
    pub fn is_array(value: &Value) -> bool {
        matches!(value, Value::List(_))
    }

    /// Returns true if `value` is a container
    pub fn is_map(value: &Value) -> bool {
        matches!(value, Value::Map(_))
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the container holds no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Array-style name for [`Map::len`]
    pub fn length(&self) -> usize {
        self.len()
    }

    /// Map-style name for [`Map::len`]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Reads a virtual property. Only `length` and `size` exist.
    pub fn property(&self, name: &str) -> Result<usize, MapError> {
        match name {
            "length" | "size" => Ok(self.len()),
            _ => Err(MapError::UndefinedProperty {
                name: name.to_string(),
            }),
        }
    }

    /// Gets a value by key
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items.get(&key.into())
    }

    /// Gets a value by key, or `default` when the key is absent
    pub fn get_or<'a>(&'a self, key: impl Into<Key>, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Gets a cloned value by key, computing a fallback when the key is absent
    pub fn get_or_else<F>(&self, key: impl Into<Key>, default: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        self.get(key).cloned().unwrap_or_else(default)
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        self.items.get_mut(&key.into())
    }

    /// Returns true if an entry with the key exists
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    /// Adds or updates an entry. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Removes an entry by key, preserving the order of the rest.
    ///
    /// Returns true if an entry was removed.
    pub fn delete(&mut self, key: impl Into<Key>) -> bool {
        self.items.shift_remove(&key.into()).is_some()
    }

    /// Removes all entries
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self.next_index = Some(0);
        self
    }

    /// Returns an iterator over key-value pairs in storage order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.items.iter()
    }

    /// Returns a mutable iterator over key-value pairs in storage order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.items.iter_mut()
    }

    /// Ordered `(key, value)` pairs, the `entries()` view
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.iter()
    }

    /// Get a reference to the backing store for advanced access
    pub fn as_indexmap(&self) -> &IndexMap<Key, Value> {
        &self.items
    }

    /// Appends a value under the next sequence key.
    ///
    /// Once `usize::MAX` has been used as a key there is no next sequence key,
    /// and the value is dropped.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        match self.next_index {
            Some(next) => self.insert(Key::Index(next), value.into()),
            None => trace!("sequence keys exhausted, push skipped"),
        }
        self
    }

    /// Removes and returns the value of the last entry
    pub fn pop(&mut self) -> Option<Value> {
        let (key, value) = self.items.pop()?;
        if let Some(i) = key.as_index().filter(|i| i.checked_add(1) == self.next_index) {
            self.next_index = Some(i);
        }
        Some(value)
    }

    /// Removes and returns the value of the first entry.
    ///
    /// Remaining sequence keys are renumbered from zero.
    pub fn shift(&mut self) -> Option<Value> {
        let (_, value) = self.items.shift_remove_index(0)?;
        let rest = std::mem::take(&mut self.items);
        self.replace_renumbered(rest);
        Some(value)
    }

    /// Prepends values, renumbering existing sequence keys after them
    pub fn unshift<I, T>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let existing = std::mem::take(&mut self.items);
        let entries = values
            .into_iter()
            .map(|v| (Key::Index(0), v.into()))
            .chain(existing);
        self.replace_renumbered(entries);
        self
    }

    /// Removes `delete_count` entries from the resolved `start` and inserts `items`
    /// in their place. `None` removes through the end.
    ///
    /// Mutates the receiver and returns the removed values as a new container.
    /// Sequence keys on both sides are renumbered.
    ///
    /// ```
    /// # use valmap::Map;
    /// let mut months = Map::of(["Jan", "March", "April", "June"]);
    /// months.splice(1, Some(0), ["Feb"]);
    /// assert_eq!(months.join(","), "Jan,Feb,March,April,June");
    ///
    /// let removed = months.splice(-1, Some(1), ["May"]);
    /// assert_eq!(removed.join(","), "June");
    /// assert_eq!(months.join(","), "Jan,Feb,March,April,May");
    /// ```
    pub fn splice<I, T>(&mut self, start: i64, delete_count: Option<usize>, items: I) -> Map
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let len = self.len();
        let from = resolve_bound(start, len);
        let to = delete_count.map_or(len, |count| from.saturating_add(count).min(len));

        let mut entries: Vec<(Key, Value)> = std::mem::take(&mut self.items).into_iter().collect();
        let removed: Vec<(Key, Value)> = entries
            .splice(
                from..to,
                items.into_iter().map(|v| (Key::Index(0), v.into())),
            )
            .collect();
        self.replace_renumbered(entries);

        let mut out = Map::new();
        out.replace_renumbered(removed);
        out
    }

    /// Copies the entries in `[start, end)` over the entries beginning at `target`,
    /// keeping the original length. Keys are untouched.
    ///
    /// ```
    /// # use valmap::Map;
    /// let mut map = Map::of([1, 2, 3, 4, 5]);
    /// map.copy_within(0, 3, None);
    /// assert_eq!(map.join(","), "4,5,3,4,5");
    /// ```
    pub fn copy_within(&mut self, target: i64, start: i64, end: Option<i64>) -> &mut Self {
        let len = self.len();
        if start == 0 && (target == 0 || target >= len as i64) {
            trace!(target, len, "copy_within is a no-op");
            return self;
        }

        let target = resolve_bound(target, len);
        let from = resolve_bound(start, len);
        let to = end.map_or(len, |e| resolve_bound(e, len));
        if to <= from {
            return self;
        }

        let copied: Vec<Value> = self.items.values().skip(from).take(to - from).cloned().collect();
        for (offset, value) in copied.into_iter().enumerate() {
            match self.items.get_index_mut(target + offset) {
                Some((_, slot)) => *slot = value,
                None => break,
            }
        }
        self
    }

    /// Inserts an entry, advancing the next sequence key past index keys.
    fn insert(&mut self, key: Key, value: Value) {
        if let (Key::Index(i), Some(next)) = (&key, self.next_index) {
            if *i >= next {
                self.next_index = i.checked_add(1);
            }
        }
        self.items.insert(key, value);
    }

    /// Replaces the store with `entries`, renumbering sequence keys from zero in order.
    fn replace_renumbered(&mut self, entries: impl IntoIterator<Item = (Key, Value)>) {
        self.items = IndexMap::new();
        self.next_index = Some(0);
        let mut position = 0;
        for (key, value) in entries {
            match key {
                Key::Index(_) => {
                    self.insert(Key::Index(position), value);
                    position += 1;
                }
                name => self.insert(name, value),
            }
        }
    }
}

/// Strict structural equality: same entries in the same order.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| a == b)
    }
}

/// Single-argument construction.
///
/// Null yields an empty container, a list is taken positionally, a container is
/// kept, text goes through [`Map::parse`], and any other scalar becomes one entry.
impl From<Value> for Map {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Map::new(),
            Value::List(items) => items.into_iter().collect(),
            Value::Map(map) => map,
            Value::Text(text) => Map::parse(&text),
            scalar => Map::of([scalar]),
        }
    }
}

/// Strict parsing, see [`Map::parse_strict`].
impl std::str::FromStr for Map {
    type Err = crate::Error;

    fn from_str(text: &str) -> crate::Result<Self> {
        Ok(Map::parse_strict(text)?)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Map {
    fn from(values: Vec<T>) -> Self {
        Map::of(values)
    }
}

impl FromIterator<Value> for Map {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl FromIterator<char> for Map {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        iter.into_iter().map(Value::from).collect()
    }
}

impl FromIterator<(Key, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Extend<Value> for Map {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        for value in iter {
            self.push(value);
        }
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
