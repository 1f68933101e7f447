//! Loaded records as supplied by the data source.
//!
//! A [`Record`] is one materialized entity: its model name, primary id,
//! attribute map and the relation slots the data source filled in. The
//! document builder only ever borrows records; it never changes them.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use smol_str::SmolStr;

/// Primary key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Integer key.
    Int(i64),
    /// String key (uuid, slug, ...).
    Str(String),
}

impl RecordId {
    /// Convert a JSON attribute value into an id.
    ///
    /// Returns `None` for `null`, booleans, floats, arrays and objects.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_i64().map(Self::Int),
            JsonValue::String(s) => Some(Self::Str(s.clone())),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self::Int(id as i64)
    }
}

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self::Int(id as i64)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

/// The materialized value of a relation slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationValue {
    /// The relation is configured on the record but nothing was loaded.
    Unloaded,
    /// A loaded to-one relation; `None` when no related row exists.
    One(Option<Box<Record>>),
    /// A loaded to-many relation.
    Many(Vec<Record>),
}

impl RelationValue {
    /// Check if a value was materialized by the data source.
    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::Unloaded)
    }

    /// Iterate the related records, flattening to-one and to-many alike.
    pub fn records(&self) -> std::slice::Iter<'_, Record> {
        match self {
            Self::Unloaded | Self::One(None) => std::slice::Iter::default(),
            Self::One(Some(record)) => std::slice::from_ref(record.as_ref()).iter(),
            Self::Many(records) => records.iter(),
        }
    }
}

/// One loaded entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Registry name of the record's model.
    pub model: SmolStr,
    /// Primary id. `None` for placeholders that were never fetched.
    pub id: Option<RecordId>,
    /// Attribute values, including the primary key and foreign keys.
    pub attributes: IndexMap<String, JsonValue>,
    /// Relation slots keyed by relation name.
    pub relations: IndexMap<String, RelationValue>,
}

impl Record {
    /// Create a record with an id and no attributes.
    pub fn new(model: impl Into<SmolStr>, id: impl Into<RecordId>) -> Self {
        Self {
            model: model.into(),
            id: Some(id.into()),
            attributes: IndexMap::new(),
            relations: IndexMap::new(),
        }
    }

    /// Create an id-less placeholder record.
    pub fn placeholder(model: impl Into<SmolStr>) -> Self {
        Self {
            model: model.into(),
            id: None,
            attributes: IndexMap::new(),
            relations: IndexMap::new(),
        }
    }

    /// Set an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attach a relation value.
    pub fn relation(mut self, name: impl Into<String>, value: RelationValue) -> Self {
        self.relations.insert(name.into(), value);
        self
    }

    /// Attach a loaded to-one relation.
    pub fn with_one(self, name: impl Into<String>, related: Option<Record>) -> Self {
        self.relation(name, RelationValue::One(related.map(Box::new)))
    }

    /// Attach a loaded to-many relation.
    pub fn with_many(self, name: impl Into<String>, related: Vec<Record>) -> Self {
        self.relation(name, RelationValue::Many(related))
    }

    /// Mark a relation as configured but not loaded.
    pub fn with_unloaded(self, name: impl Into<String>) -> Self {
        self.relation(name, RelationValue::Unloaded)
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }

    /// Get the relation context for a relation name.
    pub fn related(&self, name: &str) -> Option<&RelationValue> {
        self.relations.get(name)
    }

    /// Check if the record exposes a relation context for `name`.
    pub fn has_relation(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }
}
