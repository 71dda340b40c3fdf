//! Read access to live record instances for interpretation mode.

use serde_json::{Map, Value};

/// A borrowed field value, shaped by kind.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    /// Wide enough for every `i64` and `u64`.
    Integer(i128),
    Record(&'a dyn Record),
    /// An explicit null.
    Null,
    /// Anything else (booleans, floats, arrays).
    Other,
}

impl FieldValue<'_> {
    /// Short name of the value's shape, used in mismatch messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Record(_) => "record",
            Self::Null => "null",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
            Self::Null => f.write_str("Null"),
            Self::Other => f.write_str("Other"),
        }
    }
}

/// A record instance whose fields can be read by name.
pub trait Record {
    /// Returns the named field, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(json_value)
    }
}

/// Non-object values have no fields.
impl Record for Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.as_object().and_then(|map| map.field(name))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

fn json_value(value: &Value) -> FieldValue<'_> {
    match value {
        Value::String(s) => FieldValue::Text(s),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .map_or(FieldValue::Other, FieldValue::Integer),
        Value::Object(map) => FieldValue::Record(map),
        Value::Null => FieldValue::Null,
        Value::Bool(_) | Value::Array(_) => FieldValue::Other,
    }
}
