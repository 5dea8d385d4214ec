//! Generic enumerable over keyed values.
//!
//! [`Collection`] is a lighter companion to [`Map`]: it keeps the same keyed,
//! ordered storage but only offers enumeration and lookup helpers, most notably
//! [`Collection::first_where`] for picking records by a field.

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

use crate::errors::MapError;
use crate::key::Key;
use crate::map::{JsonFormat, Map};
use crate::value::{Value, loose_cmp};

/// Comparison applied by [`Collection::first_where`].
///
/// Loose comparisons go through [`loose_cmp`]; strict ones use `PartialEq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Operator {
    /// `=` or `==`
    #[default]
    LooseEq,
    /// `===`
    StrictEq,
    /// `!=` or `<>`
    LooseNe,
    /// `!==`
    StrictNe,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl Operator {
    /// Evaluates `element <op> value`.
    pub fn test(self, element: &Value, value: &Value) -> bool {
        let loose = || loose_cmp(element, value);
        match self {
            Operator::LooseEq => loose() == Ordering::Equal,
            Operator::StrictEq => element == value,
            Operator::LooseNe => loose() != Ordering::Equal,
            Operator::StrictNe => element != value,
            Operator::Lt => loose() == Ordering::Less,
            Operator::Gt => loose() == Ordering::Greater,
            Operator::Le => loose() != Ordering::Greater,
            Operator::Ge => loose() != Ordering::Less,
        }
    }
}

/// Parses an operator token. Unknown tokens fall back to loose equality.
impl From<&str> for Operator {
    fn from(token: &str) -> Self {
        match token {
            "=" | "==" => Operator::LooseEq,
            "===" => Operator::StrictEq,
            "!=" | "<>" => Operator::LooseNe,
            "!==" => Operator::StrictNe,
            "<" => Operator::Lt,
            ">" => Operator::Gt,
            "<=" => Operator::Le,
            ">=" => Operator::Ge,
            other => {
                trace!(token = other, "unknown operator, comparing with ==");
                Operator::LooseEq
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operator::LooseEq => "==",
            Operator::StrictEq => "===",
            Operator::LooseNe => "!=",
            Operator::StrictNe => "!==",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
        })
    }
}

/// Ordered, keyed enumerable.
///
/// ```
/// # use valmap::{Collection, Value};
/// let users = Collection::from(Value::from(
///     r#"[{"name": "ann", "age": 31}, {"name": "bob", "age": 17}]"#,
/// ));
/// let minor = users.first_where("age", "<", &Value::from(18));
/// assert_eq!(minor.and_then(|u| u.field(&"name".into())), Some(&Value::from("bob")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Map,
}

impl Collection {
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from positional values
    pub fn of<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            items: Map::of(values),
        }
    }

    /// Returns the number of entries
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection holds no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the collection holds at least one entry
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the backing container
    pub fn all(&self) -> &Map {
        &self.items
    }

    /// Gets a value by key
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items.get(key)
    }

    /// Returns the first value in storage order
    pub fn first(&self) -> Option<&Value> {
        self.items.iter().next().map(|(_, value)| value)
    }

    /// Returns the first value satisfying `predicate`
    pub fn first_matching<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.items.find(predicate)
    }

    /// Returns the first value, or `default` when the collection is empty
    pub fn first_or<'a>(&'a self, default: &'a Value) -> &'a Value {
        self.first().unwrap_or(default)
    }

    /// Returns the first record whose field at `path` compares to `value` under `op`.
    ///
    /// `path` is dot-separated (`"_meta.author"`). Each segment names a field of a
    /// container or, when it is a number, a position. A missing field reads as null.
    ///
    /// ```
    /// # use valmap::{Collection, Value};
    /// let items = Collection::from(Value::from(r#"[{"order": 1}, {"order": 2}, {"order": 3}]"#));
    /// let found = items.first_where("order", ">", &Value::from(1));
    /// assert_eq!(found.and_then(|v| v.field(&"order".into())), Some(&Value::from(2)));
    /// assert_eq!(items.first_where("order", "!==", &Value::from(1)), found);
    /// ```
    pub fn first_where(
        &self,
        path: &str,
        op: impl Into<Operator>,
        value: &Value,
    ) -> Option<&Value> {
        let op = op.into();
        self.items.find(|item, _| {
            let element = path
                .split('.')
                .try_fold(item, |current, segment| field_by_segment(current, segment));
            op.test(element.unwrap_or(&NULL), value)
        })
    }

    /// [`Collection::first_where`] with the path given as explicit keys.
    pub fn first_where_path<I, K>(
        &self,
        path: I,
        op: impl Into<Operator>,
        value: &Value,
    ) -> Option<&Value>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let path: Vec<Key> = path.into_iter().map(Into::into).collect();
        let op = op.into();
        self.items.find(|item, _| {
            let element = path
                .iter()
                .try_fold(item, |current, key| current.field(key));
            op.test(element.unwrap_or(&NULL), value)
        })
    }

    /// Returns a collection holding the keys as values
    pub fn keys(&self) -> Collection {
        Collection::from(self.items.keys())
    }

    /// Returns a collection of the values re-keyed from zero
    pub fn values(&self) -> Collection {
        Collection::from(self.items.values())
    }

    /// Applies `f` to every entry, preserving keys
    pub fn map<F>(&self, f: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        Collection::from(self.items.map(f))
    }

    /// Returns an iterator over key-value pairs in storage order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.items.iter()
    }

    /// Deep-materializes the entries into plain JSON structures
    pub fn to_array(&self) -> serde_json::Value {
        self.items.to_array()
    }

    /// Serializes the entries to a JSON string
    pub fn to_json(&self, format: JsonFormat) -> Result<String, MapError> {
        self.items.to_json(format)
    }
}

static NULL: Value = Value::Null;

/// Named field first, then a position when the segment is numeric.
fn field_by_segment<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    value.field(&Key::from(segment)).or_else(|| {
        let index = segment.parse::<usize>().ok()?;
        value.field(&Key::Index(index))
    })
}

impl From<Map> for Collection {
    fn from(items: Map) -> Self {
        Self { items }
    }
}

/// Single-argument construction, coercing like [`Map`]'s `From<Value>`.
impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Self {
            items: Map::from(value),
        }
    }
}

impl From<Collection> for Map {
    fn from(collection: Collection) -> Self {
        collection.items
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
