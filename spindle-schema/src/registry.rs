//! Type registry and relationship descriptors.
//!
//! A [`Registry`] maps model names to the wire type they serialize as and the
//! relationships declared on them. It is built once at setup and then passed
//! explicitly to every component that needs it:
//!
//! ```rust
//! use spindle_schema::{Registry, RelationshipDescriptor, TypeEntry};
//!
//! let registry = Registry::builder()
//!     .register(
//!         TypeEntry::new("Post", "posts")
//!             .relationship(RelationshipDescriptor::to_one("author", "Author", "author_id")),
//!     )
//!     .register(
//!         TypeEntry::new("Author", "authors")
//!             .relationship(RelationshipDescriptor::to_many("posts", "Post")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.wire_type("Post"), Some("posts"));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};

/// Whether a relationship resolves to at most one or to many related records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most one related record (belongs-to / has-one).
    #[serde(rename = "toOne", alias = "belongsTo", alias = "hasOne")]
    ToOne,
    /// Any number of related records (has-many / many-to-many).
    #[serde(
        rename = "toMany",
        alias = "hasMany",
        alias = "belongsToMany",
        alias = "manyToMany"
    )]
    ToMany,
}

impl Cardinality {
    /// Check if this is a "to-one" relationship.
    pub fn is_to_one(&self) -> bool {
        matches!(self, Self::ToOne)
    }

    /// Check if this is a "to-many" relationship.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::ToMany)
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToOne => write!(f, "toOne"),
            Self::ToMany => write!(f, "toMany"),
        }
    }
}

/// A relationship declared on a registered model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Relation name, as used in include paths and on records.
    pub name: SmolStr,
    /// Cardinality of the relationship.
    pub cardinality: Cardinality,
    /// Registry name of the related model.
    pub related_model: SmolStr,
    /// Attribute on the owning record holding the related id (to-one only).
    pub foreign_key: Option<SmolStr>,
}

impl RelationshipDescriptor {
    /// Create a to-one relationship backed by a foreign key on the owner.
    pub fn to_one(
        name: impl Into<SmolStr>,
        related_model: impl Into<SmolStr>,
        foreign_key: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ToOne,
            related_model: related_model.into(),
            foreign_key: Some(foreign_key.into()),
        }
    }

    /// Create a to-one relationship whose key lives on the related side.
    pub fn has_one(name: impl Into<SmolStr>, related_model: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ToOne,
            related_model: related_model.into(),
            foreign_key: None,
        }
    }

    /// Create a to-many relationship.
    pub fn to_many(name: impl Into<SmolStr>, related_model: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::ToMany,
            related_model: related_model.into(),
            foreign_key: None,
        }
    }
}

/// Registration of one model: its wire type, primary key and relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Registry name of the model.
    pub name: SmolStr,
    /// The `type` member emitted on the wire.
    pub wire_type: SmolStr,
    /// Attribute holding the primary key.
    pub primary_key: SmolStr,
    relationships: IndexMap<SmolStr, RelationshipDescriptor>,
}

impl TypeEntry {
    /// Create a new entry with the default `id` primary key.
    pub fn new(name: impl Into<SmolStr>, wire_type: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            wire_type: wire_type.into(),
            primary_key: SmolStr::new_static("id"),
            relationships: IndexMap::new(),
        }
    }

    /// Set the primary key attribute.
    pub fn primary_key(mut self, primary_key: impl Into<SmolStr>) -> Self {
        self.primary_key = primary_key.into();
        self
    }

    /// Declare a relationship. A later declaration with the same name replaces
    /// the earlier one.
    pub fn relationship(mut self, descriptor: RelationshipDescriptor) -> Self {
        self.relationships.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Get a relationship by name.
    pub fn get_relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.get(name)
    }

    /// Iterate relationships in declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipDescriptor> {
        self.relationships.values()
    }
}

/// Registry of every model the document builder can serialize.
///
/// A registry always holds at least one type; see [`RegistryBuilder::build`].
#[derive(Debug, Clone)]
pub struct Registry {
    types: IndexMap<SmolStr, TypeEntry>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get a type entry by model name.
    pub fn get(&self, model: &str) -> Option<&TypeEntry> {
        self.types.get(model)
    }

    /// Check if a model is registered.
    pub fn contains(&self, model: &str) -> bool {
        self.types.contains_key(model)
    }

    /// Get the wire type for a model.
    pub fn wire_type(&self, model: &str) -> Option<&str> {
        self.types.get(model).map(|entry| entry.wire_type.as_str())
    }

    /// Get a relationship declared on a model.
    pub fn relationship(&self, model: &str, relation: &str) -> Option<&RelationshipDescriptor> {
        self.types.get(model)?.get_relationship(relation)
    }

    /// Iterate registered entries in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false` for a built registry.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builder for [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    entries: Vec<TypeEntry>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type.
    pub fn register(mut self, entry: TypeEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Register several types.
    pub fn register_all(mut self, entries: impl IntoIterator<Item = TypeEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Validate and build the registry.
    ///
    /// Fails when no type was registered, when a model name is registered
    /// twice, when a relationship targets an unregistered model, or when a
    /// to-many relationship declares a foreign key.
    pub fn build(self) -> SchemaResult<Registry> {
        if self.entries.is_empty() {
            return Err(SchemaError::config(
                "registry must contain at least one registered type",
            ));
        }

        let mut types = IndexMap::with_capacity(self.entries.len());
        for entry in self.entries {
            if types.contains_key(&entry.name) {
                return Err(SchemaError::duplicate("type", entry.name.as_str()));
            }
            types.insert(entry.name.clone(), entry);
        }

        for entry in types.values() {
            for rel in entry.relationships() {
                if !types.contains_key(&rel.related_model) {
                    return Err(SchemaError::unknown_type(
                        entry.name.as_str(),
                        rel.name.as_str(),
                        rel.related_model.as_str(),
                    ));
                }
                if rel.cardinality.is_to_many() && rel.foreign_key.is_some() {
                    return Err(SchemaError::invalid_relation(
                        entry.name.as_str(),
                        rel.name.as_str(),
                        "to-many relationships cannot declare a foreign key",
                    ));
                }
            }
        }

        debug!(types = types.len(), "Built type registry");
        Ok(Registry { types })
    }
}
