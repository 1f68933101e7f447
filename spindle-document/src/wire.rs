//! JSON:API wire types.
//!
//! These types serialize to exactly the members JSON:API expects. Optional
//! members are skipped rather than emitted as `null`, except relationship
//! `data` for an absent to-one, which must be an explicit `null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Minimal `{type, id}` reference to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Linkage {
    /// Wire type of the referenced resource.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stringified id of the referenced resource.
    pub id: String,
}

impl Linkage {
    /// Create a new linkage.
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// `self` and `related` links of a relationship object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    /// URL of the relationship itself.
    #[serde(rename = "self")]
    pub self_link: String,
    /// URL of the related resource(s).
    pub related: String,
}

/// Resource linkage carried in a relationship's `data` member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage; `None` serializes as `null`.
    One(Option<Linkage>),
    /// To-many linkage.
    Many(Vec<Linkage>),
}

/// A relationship object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipObject {
    /// Relationship links.
    pub links: RelationshipLinks,
    /// Linkage, omitted entirely when not resolved.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_data"
    )]
    pub data: Option<RelationshipData>,
}

// A present `"data": null` is a resolved empty to-one, not a missing member.
fn present_data<'de, D>(deserializer: D) -> Result<Option<RelationshipData>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RelationshipData::deserialize(deserializer).map(Some)
}

impl RelationshipObject {
    /// Check if the object carries linkage.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

/// A resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Wire type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stringified id.
    pub id: String,
    /// Attributes without the primary key and to-one foreign keys.
    pub attributes: IndexMap<String, JsonValue>,
    /// Relationship objects, omitted when there are none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, RelationshipObject>>,
}

impl ResourceObject {
    /// Get a relationship object by name.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipObject> {
        self.relationships.as_ref()?.get(name)
    }
}

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A single resource.
    One(Box<ResourceObject>),
    /// A collection of resources.
    Many(Vec<ResourceObject>),
}

impl PrimaryData {
    /// Iterate the primary resources.
    pub fn resources(&self) -> std::slice::Iter<'_, ResourceObject> {
        match self {
            Self::One(resource) => std::slice::from_ref(resource.as_ref()).iter(),
            Self::Many(resources) => resources.iter(),
        }
    }
}

/// A top-level JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data.
    pub data: PrimaryData,
    /// Sideloaded resources, present whenever includes were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl Document {
    /// Serialize to a `serde_json::Value`.
    pub fn to_value(&self) -> serde_json::Result<JsonValue> {
        serde_json::to_value(self)
    }
}
