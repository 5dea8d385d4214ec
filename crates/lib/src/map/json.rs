//! Serde support and JSON materialization for containers and values.
//!
//! A container whose keys are exactly `0..n` in storage order serializes as a
//! sequence. Any other container serializes as a map with stringified keys.

use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Map;
use crate::errors::MapError;
use crate::key::Key;
use crate::value::Value;

/// Output layout for [`Map::to_json`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// No insignificant whitespace
    #[default]
    Compact,
    /// Indented, one entry per line
    Pretty,
}

impl Map {
    /// Returns true if the keys are exactly `0..len` in storage order.
    pub fn is_dense(&self) -> bool {
        self.items
            .keys()
            .enumerate()
            .all(|(position, key)| key.as_index() == Some(position))
    }

    /// Deep-materializes the container into plain JSON structures.
    ///
    /// Dense containers and lists become arrays, other containers become objects
    /// with stringified keys. Non-finite floats have no JSON form and become null.
    ///
    /// ```
    /// # use valmap::Map;
    /// let json = serde_json::json!([1, "two", [3, {"four": 4}]]);
    /// let map = Map::from(valmap::Value::from(json.clone()));
    /// assert_eq!(map.to_array(), json);
    /// ```
    pub fn to_array(&self) -> serde_json::Value {
        if self.is_dense() {
            serde_json::Value::Array(self.items.values().map(Value::to_json_value).collect())
        } else {
            serde_json::Value::Object(
                self.items
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_json_value()))
                    .collect(),
            )
        }
    }

    /// Serializes the container to a JSON string.
    ///
    /// Fails with [`MapError::Encoding`] when a value has no JSON form, such as a
    /// non-finite float.
    ///
    /// ```
    /// # use valmap::{JsonFormat, Map, Value};
    /// let mut map = Map::of([1, 2]);
    /// map.set("name", "x");
    /// assert_eq!(map.to_json(JsonFormat::Compact).unwrap(), r#"{"0":1,"1":2,"name":"x"}"#);
    ///
    /// let bad = Map::of([Value::Float(f64::NAN)]);
    /// assert!(bad.to_json(JsonFormat::Compact).unwrap_err().is_encoding_error());
    /// ```
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

impl Value {
    /// Deep-materializes the value into a plain JSON structure.
    ///
    /// Containers follow [`Map::to_array`]; non-finite floats become null.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json_value).collect())
            }
            Value::Map(map) => map.to_array(),
        }
    }
}

impl Serialize for Map {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_dense() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.items.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in &self.items {
                map.serialize_entry(&key.to_string(), value)?;
            }
            map.end()
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!(
                "non-finite float {f} has no JSON representation"
            ))),
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any self-describing value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        // Integers past i64::MAX keep their magnitude as a float
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        MapVisitor.visit_map(access).map(Value::Map)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = Map;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence or a map with string keys")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Map, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut map = Map::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            map.push(value);
        }
        Ok(map)
    }

    fn visit_map<A>(self, mut access: A) -> Result<Map, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, Value>()? {
            map.set(Key::Name(name), value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for Map {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MapVisitor)
    }
}
