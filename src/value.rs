//! The in-memory representation of a JSON document
//!
//! A [JsonValue] is a closed tagged union with exactly one live payload per instance.
//! Object members are held in insertion order. Values come into existence as
//! [JsonValue::Unspecified] and commit to a container kind on first use through one of the
//! container operations; once any other kind has been fixed, an incompatible container
//! operation is an error rather than a coercion.
use std::borrow::Cow;

use linked_hash_map::LinkedHashMap;

use crate::errors::{ParserError, ParserErrorDetails, ParserErrorSource, ParserResult};
use crate::value_error;

/// Insertion-ordered map of object members
pub type JsonObject<'a> = LinkedHashMap<Cow<'a, str>, JsonValue<'a>>;

/// Array of values
pub type JsonArray<'a> = Vec<JsonValue<'a>>;

/// Basic enumeration of different Json values
#[derive(Debug, Clone)]
pub enum JsonValue<'a> {
    /// A value which hasn't yet committed to a kind
    Unspecified,
    /// Canonical null value
    Null,
    /// Map of values
    Object(JsonObject<'a>),
    /// Array of values
    Array(JsonArray<'a>),
    /// Canonical string value
    String(Cow<'a, str>),
    /// Canonical boolean value
    Boolean(bool),
    /// Integer numeric value
    Integer(i64),
    /// Floating point numeric value
    Float(f64),
}

impl<'a> Default for JsonValue<'a> {
    fn default() -> Self {
        JsonValue::Unspecified
    }
}

impl<'a> JsonValue<'a> {
    /// Create a new empty object value
    pub fn new_object() -> Self {
        JsonValue::Object(JsonObject::new())
    }

    /// Create a new empty array value
    pub fn new_array() -> Self {
        JsonValue::Array(JsonArray::new())
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, JsonValue::Unspecified)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, JsonValue::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonValue::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, JsonValue::Float(_))
    }

    pub fn as_object(&self) -> Option<&JsonObject<'a>> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray<'a>> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Append a value. An [JsonValue::Unspecified] value is fixed into an array by its
    /// first append; any other non-array kind is reported as a misuse
    pub fn push(&mut self, value: JsonValue<'a>) -> ParserResult<()> {
        match self {
            JsonValue::Unspecified => {
                *self = JsonValue::Array(vec![value]);
                Ok(())
            }
            JsonValue::Array(items) => {
                items.push(value);
                Ok(())
            }
            _ => value_error!(ParserErrorDetails::NotAnArray),
        }
    }

    /// Insert a key/value pair. An [JsonValue::Unspecified] value is fixed into an object
    /// by its first insert; any other non-object kind is reported as a misuse. An existing
    /// key keeps its position within the member order and has its value replaced
    pub fn insert<Key: Into<Cow<'a, str>>>(
        &mut self,
        key: Key,
        value: JsonValue<'a>,
    ) -> ParserResult<()> {
        let key = key.into();
        match self {
            JsonValue::Unspecified => {
                let mut members = JsonObject::new();
                members.insert(key, value);
                *self = JsonValue::Object(members);
                Ok(())
            }
            JsonValue::Object(members) => {
                match members.get_mut(&key) {
                    Some(existing) => *existing = value,
                    None => {
                        members.insert(key, value);
                    }
                }
                Ok(())
            }
            _ => value_error!(ParserErrorDetails::NotAnObject),
        }
    }

    /// Look up a member value by key. Non-object values have no members
    pub fn get(&self, key: &str) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Object(members) => members.get(key),
            _ => None,
        }
    }

    /// Look up an element by index. Non-array values have no elements
    pub fn get_index(&self, index: usize) -> Option<&JsonValue<'a>> {
        match self {
            JsonValue::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Create a fully owned copy of this value, detached from the original parse input
    pub fn into_owned(self) -> JsonValue<'static> {
        match self {
            JsonValue::Unspecified => JsonValue::Unspecified,
            JsonValue::Null => JsonValue::Null,
            JsonValue::Boolean(b) => JsonValue::Boolean(b),
            JsonValue::Integer(i) => JsonValue::Integer(i),
            JsonValue::Float(f) => JsonValue::Float(f),
            JsonValue::String(s) => JsonValue::String(Cow::Owned(s.into_owned())),
            JsonValue::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::into_owned).collect())
            }
            JsonValue::Object(members) => {
                let mut owned = JsonObject::new();
                for (key, value) in members {
                    owned.insert(Cow::Owned(key.into_owned()), value.into_owned());
                }
                JsonValue::Object(owned)
            }
        }
    }
}

/// Equality is structural and kind-sensitive, so an integer never compares equal to a
/// float. Objects compare by key set and member values, independently of insertion order.
/// The two sides may borrow from different sources, which allows a freshly parsed tree to
/// be compared against a detached one
impl<'a, 'b> PartialEq<JsonValue<'b>> for JsonValue<'a> {
    fn eq(&self, other: &JsonValue<'b>) -> bool {
        match (self, other) {
            (JsonValue::Unspecified, JsonValue::Unspecified) => true,
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Boolean(a), JsonValue::Boolean(b)) => a == b,
            (JsonValue::Integer(a), JsonValue::Integer(b)) => a == b,
            (JsonValue::Float(a), JsonValue::Float(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.get(key.as_ref()).map_or(false, |found| value == found)
                    })
            }
            _ => false,
        }
    }
}

impl<'a> From<bool> for JsonValue<'a> {
    fn from(value: bool) -> Self {
        JsonValue::Boolean(value)
    }
}

impl<'a> From<i64> for JsonValue<'a> {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl<'a> From<f64> for JsonValue<'a> {
    fn from(value: f64) -> Self {
        JsonValue::Float(value)
    }
}

impl<'a> From<&'a str> for JsonValue<'a> {
    fn from(value: &'a str) -> Self {
        JsonValue::String(Cow::Borrowed(value))
    }
}

impl<'a> From<String> for JsonValue<'a> {
    fn from(value: String) -> Self {
        JsonValue::String(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for JsonValue<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        JsonValue::String(value)
    }
}

impl<'a> From<JsonArray<'a>> for JsonValue<'a> {
    fn from(value: JsonArray<'a>) -> Self {
        JsonValue::Array(value)
    }
}

impl<'a> From<JsonObject<'a>> for JsonValue<'a> {
    fn from(value: JsonObject<'a>) -> Self {
        JsonValue::Object(value)
    }
}
