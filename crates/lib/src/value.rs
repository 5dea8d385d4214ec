//! Dynamic values stored in containers.
//!
//! This module provides the [`Value`] enum that represents every payload a
//! container can hold. Values are either scalars (null, booleans, numbers, text),
//! plain sequences ([`Value::List`]) or nested containers ([`Value::Map`]).
//!
//! Two platform quirks are isolated here as named predicates so the rules stay
//! explicit: [`Value::is_nan_value`] for the `NaN`-matches-`NaN` membership rule and
//! [`Value::is_filter_truthy`] for the default predicate of `filter`.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::MapError;
use crate::map::{Depth, Map};

/// Values that can be stored in a container.
///
/// # Value Types
///
/// ## Scalars
/// - [`Value::Null`] - Absent value
/// - [`Value::Bool`] - Boolean values
/// - [`Value::Int`] - 64-bit signed integers
/// - [`Value::Float`] - IEEE-754 doubles, including `NaN`
/// - [`Value::Text`] - UTF-8 strings
///
/// ## Composites
/// - [`Value::List`] - Plain dense sequence
/// - [`Value::Map`] - Nested keyed container
///
/// # Strict Equality
///
/// `PartialEq` never coerces between variants:
///
/// ```
/// # use valmap::Value;
/// assert!(Value::Int(1) != Value::Float(1.0));
/// assert!(Value::Text("1".to_string()) != Value::Int(1));
/// assert!(Value::Float(f64::NAN) != Value::Float(f64::NAN));
///
/// // Direct comparison with primitives
/// assert!(Value::from("hello") == "hello");
/// assert!(Value::from(42) == 42);
/// assert!(true == Value::from(true));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Scalars
    /// Null/absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),

    // Composites
    /// Plain sequence of values
    List(Vec<Value>),
    /// Nested container
    Map(Map),
}

impl Value {
    /// Returns true if this is a scalar value
    pub fn is_scalar(&self) -> bool {
        !self.is_composite()
    }

    /// Returns true if this value holds other values (a list or a container)
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a composite holding no values
    pub fn is_empty_composite(&self) -> bool {
        match self {
            Value::List(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }

    /// Returns true if this is a float holding `NaN`.
    ///
    /// `NaN` never equals itself under strict equality, so membership tests
    /// consult this predicate explicitly.
    pub fn is_nan_value(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// Returns the truthiness used by `filter` when no predicate is supplied.
    ///
    /// Falsy values are `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty
    /// composites. Everything else, `NaN` included, is truthy.
    ///
    /// ```
    /// # use valmap::Value;
    /// assert!(!Value::from("0").is_filter_truthy());
    /// assert!(!Value::List(vec![]).is_filter_truthy());
    /// assert!(Value::from("0.0").is_filter_truthy());
    /// assert!(Value::Float(f64::NAN).is_filter_truthy());
    /// ```
    pub fn is_filter_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    /// Strict equality with the `NaN` special case: a `NaN` matches any `NaN`.
    pub fn same_value(&self, other: &Value) -> bool {
        if self.is_nan_value() {
            return other.is_nan_value();
        }
        self == other
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to convert to a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a list (returns immutable reference)
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable list reference
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a container (returns immutable reference)
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable container reference
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of a composite: a named or positional key of a container,
    /// or a position of a list.
    pub fn field(&self, key: &crate::Key) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(key),
            Value::List(items) => items.get(key.as_index()?),
            _ => None,
        }
    }

    /// Numeric reading of a value for numeric comparisons.
    ///
    /// Text counts only when it is a plain decimal literal.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Text(s) => numeric_text(s),
            Value::List(_) | Value::Map(_) => None,
        }
    }

    /// Values of a composite in order, or `None` for scalars.
    pub(crate) fn composite_values(&self) -> Option<Box<dyn Iterator<Item = &Value> + '_>> {
        match self {
            Value::List(items) => Some(Box::new(items.iter())),
            Value::Map(map) => Some(Box::new(map.iter().map(|(_, v)| v))),
            _ => None,
        }
    }
}

/// Parses text as a number only when it is a plain decimal literal.
///
/// Rejects the words `inf`, `NaN` and friends that `f64::from_str` accepts.
pub(crate) fn numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse().ok()
}

/// Renders a float the way a JavaScript engine coerces numbers to strings.
pub(crate) fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        String::from(if f > 0.0 { "Infinity" } else { "-Infinity" })
    } else if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Default ("regular") ordering with type coercion.
///
/// - booleans, and null against non-text, compare by truthiness
/// - null against text compares as the empty string
/// - numbers compare numerically, numeric text joins in numerically
/// - non-numeric text against a number compares against the number's string form
/// - composites order after scalars, then by length, then element-wise
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    use Value::*;

    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Bool(_), _) | (_, Bool(_)) => a.is_filter_truthy().cmp(&b.is_filter_truthy()),
        (Null, Text(t)) => "".cmp(t.as_str()),
        (Text(t), Null) => t.as_str().cmp(""),
        (Null, _) | (_, Null) => a.is_filter_truthy().cmp(&b.is_filter_truthy()),
        (Int(x), Int(y)) => x.cmp(y),
        (Int(_) | Float(_), Int(_) | Float(_)) => float_cmp(a.numeric(), b.numeric()),
        (Int(_) | Float(_), Text(t)) => match numeric_text(t) {
            Some(n) => float_cmp(a.numeric(), Some(n)),
            None => a.to_string().cmp(t),
        },
        (Text(t), Int(_) | Float(_)) => match numeric_text(t) {
            Some(n) => float_cmp(Some(n), b.numeric()),
            None => t.as_str().cmp(b.to_string().as_str()),
        },
        (Text(x), Text(y)) => match (numeric_text(x), numeric_text(y)) {
            (Some(n), Some(m)) => float_cmp(Some(n), Some(m)),
            _ => x.cmp(y),
        },
        (List(_) | Map(_), List(_) | Map(_)) => {
            let (xs, ys) = (composite_len(a), composite_len(b));
            xs.cmp(&ys).then_with(|| {
                a.composite_values()
                    .into_iter()
                    .flatten()
                    .zip(b.composite_values().into_iter().flatten())
                    .map(|(x, y)| loose_cmp(x, y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
        }
        (List(_) | Map(_), _) => Ordering::Greater,
        (_, List(_) | Map(_)) => Ordering::Less,
    }
}

fn composite_len(value: &Value) -> usize {
    match value {
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        _ => 0,
    }
}

fn float_cmp(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Total ordering used by the default sort.
///
/// [`loose_cmp`] is not transitive across types (`10 > "9" > "10a" > 10`), so
/// sorting ranks by type first and coerces only inside a rank:
///
/// 1. null
/// 2. booleans, `false` first
/// 3. numbers and numeric text, by numeric reading, `NaN` last
/// 4. other text, by bytes
/// 5. composites, by length then element-wise
///
/// ```
/// # use std::cmp::Ordering;
/// # use valmap::value::{Value, sort_cmp};
/// assert_eq!(sort_cmp(&Value::from("10"), &Value::from(9)), Ordering::Greater);
/// assert_eq!(sort_cmp(&Value::from("10a"), &Value::from(10)), Ordering::Greater);
/// assert_eq!(sort_cmp(&Value::Float(f64::NAN), &Value::Int(i64::MAX)), Ordering::Greater);
/// ```
pub fn sort_cmp(a: &Value, b: &Value) -> Ordering {
    let (ra, rb) = (sort_rank(a), sort_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) if ra == 4 => x.cmp(y),
        (Value::List(_) | Value::Map(_), _) => {
            let (xs, ys) = (composite_len(a), composite_len(b));
            xs.cmp(&ys).then_with(|| {
                a.composite_values()
                    .into_iter()
                    .flatten()
                    .zip(b.composite_values().into_iter().flatten())
                    .map(|(x, y)| sort_cmp(x, y))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
        }
        _ if ra == 3 => number_key(a).cmp_total(&number_key(b)),
        _ => Ordering::Equal,
    }
}

fn sort_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 1,
        Value::Bool(_) => 2,
        Value::Int(_) | Value::Float(_) => 3,
        Value::Text(t) if numeric_text(t).is_some() => 3,
        Value::Text(_) => 4,
        Value::List(_) | Value::Map(_) => 5,
    }
}

/// Numeric reading of a rank-3 value.
///
/// `approx` alone loses precision for integers past 2^53, so values sharing an
/// `approx` are split by their exact integral reading.
struct NumberKey {
    approx: f64,
    exact: i128,
}

fn number_key(value: &Value) -> NumberKey {
    match value {
        Value::Int(n) => NumberKey {
            approx: *n as f64,
            exact: i128::from(*n),
        },
        other => {
            let approx = other.numeric().unwrap_or(f64::NAN);
            let exact = if approx.is_finite() && approx.fract() == 0.0 {
                approx as i128
            } else {
                0
            };
            NumberKey { approx, exact }
        }
    }
}

impl NumberKey {
    fn cmp_total(&self, other: &NumberKey) -> Ordering {
        total_float_cmp(self.approx, other.approx).then(self.exact.cmp(&other.exact))
    }
}

/// Orders floats with every `NaN` equal to each other and after all numbers.
pub(crate) fn total_float_cmp(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// String coercion used by `join` and `to_string`.
///
/// Booleans render as `true`/`false`, null and empty composites as the empty
/// string, and non-empty composites by flattening fully and joining with `,`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                let map: Map = items.iter().cloned().collect();
                f.write_str(&map.flat(Depth::Infinite).join(","))
            }
            Value::Map(map) => f.write_str(&map.flat(Depth::Infinite).join(",")),
        }
    }
}

// Convenient From implementations for common types
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (crate::Key::Name(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// TryFrom implementations for typed extraction
impl TryFrom<&Value> for String {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            _ => Err(MapError::TypeMismatch {
                expected: "String".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = MapError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(MapError::TypeMismatch {
                expected: "&str".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for i64 {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(*n),
            _ => Err(MapError::TypeMismatch {
                expected: "i64".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(*f),
            _ => Err(MapError::TypeMismatch {
                expected: "f64".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = MapError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            _ => Err(MapError::TypeMismatch {
                expected: "bool".to_string(),
                actual: value.type_name().to_string(),
            }),
        }
    }
}

// PartialEq implementations for comparing Value with primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(f) if f == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
