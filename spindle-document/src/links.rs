//! Relationship object construction.

use serde_json::Value as JsonValue;

use spindle_schema::{Cardinality, Registry, RelationshipDescriptor};

use crate::error::{DocumentError, DocumentResult};
use crate::record::{Record, RecordId, RelationValue};
use crate::wire::{Linkage, RelationshipData, RelationshipLinks, RelationshipObject};

/// Builds relationship objects with `self`/`related` links and linkage.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// Create a link builder. An empty base URL yields root-relative links.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the relationship object for `relation_name` on `record`.
    ///
    /// Returns `Ok(None)` when the record exposes no relation context for the
    /// name. To-one linkage is derived from the foreign key regardless of
    /// `is_loaded`; a to-one without a foreign key needs its value loaded.
    /// To-many linkage is emitted only when `is_loaded` is set and the
    /// relation value was materialized.
    pub fn build(
        &self,
        registry: &Registry,
        model: &str,
        record: &Record,
        relation_name: &str,
        descriptor: &RelationshipDescriptor,
        is_loaded: bool,
    ) -> DocumentResult<Option<RelationshipObject>> {
        let Some(value) = record.related(relation_name) else {
            return Ok(None);
        };

        let wire_type = registry
            .wire_type(model)
            .ok_or_else(|| DocumentError::unregistered_type(model))?;
        let id = record
            .id
            .as_ref()
            .ok_or_else(|| DocumentError::missing_id(model))?
            .to_string();
        let related_type = registry
            .wire_type(&descriptor.related_model)
            .ok_or_else(|| DocumentError::unregistered_type(descriptor.related_model.as_str()))?;

        let links = RelationshipLinks {
            self_link: url_merge(&[
                self.base_url.as_str(),
                wire_type,
                id.as_str(),
                "relationships",
                relation_name,
            ]),
            related: url_merge(&[self.base_url.as_str(), wire_type, id.as_str(), relation_name]),
        };

        let data = match descriptor.cardinality {
            Cardinality::ToOne => {
                to_one_linkage(record, descriptor, value, related_type).map(RelationshipData::One)
            }
            Cardinality::ToMany => match value {
                RelationValue::Many(_) if is_loaded => Some(RelationshipData::Many(
                    value
                        .records()
                        .filter_map(|r| r.id.as_ref())
                        .map(|id| Linkage::new(related_type, id.to_string()))
                        .collect(),
                )),
                _ => None,
            },
        };

        Ok(Some(RelationshipObject { links, data }))
    }
}

// `None` omits `data`; `Some(None)` is an explicit empty to-one.
fn to_one_linkage(
    record: &Record,
    descriptor: &RelationshipDescriptor,
    value: &RelationValue,
    related_type: &str,
) -> Option<Option<Linkage>> {
    let id = match descriptor.foreign_key {
        Some(ref fk) => record.get(fk).and_then(foreign_key_id),
        None => match value {
            RelationValue::Unloaded => return None,
            _ => value.records().next().and_then(|r| r.id.as_ref()).map(RecordId::to_string),
        },
    };
    Some(id.map(|id| Linkage::new(related_type, id)))
}

fn foreign_key_id(value: &JsonValue) -> Option<String> {
    RecordId::from_json(value).map(|id| id.to_string())
}

/// Join URL segments with `/`. Every segment is kept, so an empty base URL
/// produces a leading slash.
pub(crate) fn url_merge(segments: &[&str]) -> String {
    segments.join("/")
}
