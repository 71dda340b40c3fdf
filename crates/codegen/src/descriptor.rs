//! Record and field descriptors: the static shape the compiler works from.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD KIND
// ============================================================================

/// The value kind of a field, as seen by the rule registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A string value.
    Text,
    /// A whole number.
    Integer,
    /// Another record with its own plan.
    #[serde(alias = "nested-record", alias = "nestedRecord", alias = "record")]
    NestedRecord,
    /// Any other primitive (booleans, floats, ...). No rules apply.
    #[serde(alias = "other-primitive", alias = "other_primitive")]
    Other,
}

impl FieldKind {
    /// Returns the kind's display name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::NestedRecord => "nested-record",
            Self::Other => "other-primitive",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// One field of a record: its name, kind, declared type and raw tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Declared type name. For nested records this names the record whose
    /// plan the field descends into.
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Raw tag text, e.g. `"req,min(3)"`. Empty means unvalidated.
    #[serde(default)]
    pub tag: String,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: String::new(),
            tag: tag.into(),
        }
    }

    /// A nested-record field whose declared type is `type_name`.
    pub fn nested(
        name: impl Into<String>,
        type_name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::NestedRecord,
            type_name: type_name.into(),
            tag: tag.into(),
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        self.kind == FieldKind::NestedRecord
    }

    /// Returns `true` if the tag has any non-whitespace content.
    #[inline]
    pub fn is_tagged(&self) -> bool {
        !self.tag.trim().is_empty()
    }
}

/// A record shape: name, namespace and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, alias = "field")]
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_tags(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_tagged)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Every record the compiler may see, indexed by name.
///
/// Records keep their insertion order. When two records share a name the
/// first one wins for lookups.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    records: Vec<RecordDescriptor>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new(records: impl IntoIterator<Item = RecordDescriptor>) -> Self {
        let mut schema = Self::default();
        for record in records {
            schema.insert(record);
        }
        schema
    }

    pub fn insert(&mut self, record: RecordDescriptor) {
        if self.index.contains_key(&record.name) {
            tracing::warn!(record = %record.name, "duplicate record name; keeping the first");
        } else {
            self.index.insert(record.name.clone(), self.records.len());
        }
        self.records.push(record);
    }

    pub fn get(&self, name: &str) -> Option<&RecordDescriptor> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[RecordDescriptor] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if any field of any record carries a tag.
    ///
    /// Drivers use this to skip files with nothing to generate.
    pub fn has_tags(&self) -> bool {
        self.records.iter().any(RecordDescriptor::has_tags)
    }
}

impl FromIterator<RecordDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = RecordDescriptor>>(iter: I) -> Self {
        Self::new(iter)
    }
}
