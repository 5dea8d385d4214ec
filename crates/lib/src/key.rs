//! Keys for container entries.
//!
//! A [`Key`] is either a sequence position or a named slot. Both kinds coexist
//! in one container, so the same structure can behave as a dense array or as a
//! sparse dictionary depending on how it was built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The key of a container entry.
///
/// Named keys are never coerced into positions: `Key::Name("0".into())` and
/// `Key::Index(0)` are distinct keys.
///
/// ```
/// # use valmap::Key;
/// assert_eq!(Key::from(3), Key::Index(3));
/// assert_eq!(Key::from("pet"), Key::Name("pet".to_string()));
/// assert_eq!(Key::absent(), Key::Name(String::new()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Zero-based sequence position
    Index(usize),
    /// Named slot
    Name(String),
}

impl Key {
    /// The key an absent (null) key collapses to: the empty name.
    pub fn absent() -> Self {
        Key::Name(String::new())
    }

    /// Returns the position if this is an index key
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Returns the name if this is a named key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Returns true for sequence positions
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    /// Whether this key lies at or after a resolved lower bound.
    ///
    /// Named keys carry no position and are never excluded by a bound.
    pub(crate) fn at_or_after(&self, bound: i64) -> bool {
        match self {
            Key::Index(i) => *i as i64 >= bound,
            Key::Name(_) => true,
        }
    }

    /// Whether this key lies at or before a resolved upper bound.
    pub(crate) fn at_or_before(&self, bound: i64) -> bool {
        match self {
            Key::Index(i) => *i as i64 <= bound,
            Key::Name(_) => true,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            // Indices past i64::MAX keep their magnitude as a float
            Key::Index(i) => i64::try_from(i).map_or(Value::Float(i as f64), Value::Int),
            Key::Name(name) => Value::Text(name),
        }
    }
}

impl PartialEq<usize> for Key {
    fn eq(&self, other: &usize) -> bool {
        matches!(self, Key::Index(i) if i == other)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Key::Name(name) if name == other)
    }
}
