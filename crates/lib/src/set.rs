//! Deduplicating value container.
//!
//! [`Set`] keeps each distinct value once, in order of first appearance.
//! Duplicates are detected with strict equality, except that `NaN` matches `NaN`.

use std::ops::ControlFlow;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::errors::MapError;
use crate::map::{JsonFormat, Map};
use crate::value::Value;

/// Insertion-ordered collection of distinct values.
///
/// ```
/// # use valmap::{Set, Value};
/// let mut set = Set::from_iter([1, 2, 2, 3, 1].map(Value::from));
/// assert_eq!(set.size(), 3);
///
/// set.add(Value::Float(f64::NAN)).add(Value::Float(f64::NAN));
/// assert_eq!(set.size(), 4);
/// assert!(set.has(&Value::Float(f64::NAN)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Set {
    items: Vec<Value>,
}

impl Set {
    /// Creates a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from positional values, dropping repeats.
    pub fn of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        values.into_iter().map(Into::into).collect()
    }

    /// Adds a value unless an equal one is already present
    pub fn add(&mut self, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if self.has(&value) {
            trace!(value = %value, "set already holds value");
        } else {
            self.items.push(value);
        }
        self
    }

    /// Returns true if the set holds `value`
    pub fn has(&self, value: &Value) -> bool {
        self.items.iter().any(|item| value.same_value(item))
    }

    /// Removes `value`, returning true if it was present
    pub fn delete(&mut self, value: &Value) -> bool {
        match self.items.iter().position(|item| value.same_value(item)) {
            Some(position) => {
                self.items.remove(position);
                true
            }
            None => false,
        }
    }

    /// Removes all values
    pub fn clear(&mut self) -> &mut Self {
        self.items.clear();
        self
    }

    /// Returns the number of values
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set holds no values
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reads a virtual property. Only `size` exists.
    pub fn property(&self, name: &str) -> Result<usize, MapError> {
        match name {
            "size" => Ok(self.size()),
            _ => Err(MapError::UndefinedProperty {
                name: name.to_string(),
            }),
        }
    }

    /// Visits values in insertion order until `f` breaks.
    ///
    /// The value is passed twice, as key and as value.
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&Value, &Value) -> ControlFlow<()>,
    {
        for value in &self.items {
            if f(value, value).is_break() {
                break;
            }
        }
        self
    }

    /// Values in insertion order
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.items.iter()
    }

    /// Same as [`Set::values`]; sets have no separate keys.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.values()
    }

    /// `(value, value)` pairs in insertion order
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&Value, &Value)> + ExactSizeIterator {
        self.items.iter().map(|value| (value, value))
    }

    /// Deep-materializes the values into a JSON array.
    pub fn to_array(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items.iter().map(Value::to_json_value).collect())
    }

    /// Serializes the values as a JSON array string.
    pub fn to_json(&self, format: JsonFormat) -> Result<String, MapError> {
        let encoded = match format {
            JsonFormat::Compact => serde_json::to_string(self),
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
        };
        encoded.map_err(|e| MapError::Encoding {
            reason: e.to_string(),
        })
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut set = Set::new();
        for value in iter {
            set.add(value);
        }
        set
    }
}

/// The values of a container, with repeats dropped.
impl From<Map> for Set {
    fn from(map: Map) -> Self {
        map.into_iter().map(|(_, value)| value).collect()
    }
}

/// Single-argument construction, coercing like [`Map`]'s `From<Value>`.
impl From<Value> for Set {
    fn from(value: Value) -> Self {
        Set::from(Map::from(value))
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Serialize for Set {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for value in &self.items {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
