//! Record to resource object conversion.

use indexmap::IndexMap;

use spindle_schema::{Cardinality, Registry};

use crate::error::{DocumentError, DocumentResult};
use crate::include::LoadedRelations;
use crate::links::LinkBuilder;
use crate::record::Record;
use crate::wire::ResourceObject;

/// Serializes records into JSON:API resource objects.
///
/// The serializer only borrows records: attributes are copied into a fresh
/// map on every call, so cached or shared records are never altered.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSerializer<'a> {
    registry: &'a Registry,
    links: &'a LinkBuilder,
}

impl<'a> ResourceSerializer<'a> {
    /// Create a serializer over a registry and link builder.
    pub fn new(registry: &'a Registry, links: &'a LinkBuilder) -> Self {
        Self { registry, links }
    }

    /// Serialize one record of `model`.
    pub fn serialize(
        &self,
        model: &str,
        record: &Record,
        loaded: &LoadedRelations,
    ) -> DocumentResult<ResourceObject> {
        let entry = self
            .registry
            .get(model)
            .ok_or_else(|| DocumentError::unregistered_type(model))?;
        let id = record
            .id
            .as_ref()
            .ok_or_else(|| DocumentError::missing_id(model))?
            .to_string();

        let mut attributes = record.attributes.clone();
        attributes.shift_remove(entry.primary_key.as_str());

        let mut relationships = IndexMap::new();
        for descriptor in entry.relationships() {
            if !record.has_relation(&descriptor.name) {
                continue;
            }

            if let (Cardinality::ToOne, Some(fk)) = (descriptor.cardinality, &descriptor.foreign_key) {
                attributes.shift_remove(fk.as_str());
            }

            let is_loaded = loaded.is_loaded(model, &descriptor.name);
            if let Some(object) =
                self.links
                    .build(self.registry, model, record, &descriptor.name, descriptor, is_loaded)?
            {
                relationships.insert(descriptor.name.to_string(), object);
            }
        }

        Ok(ResourceObject {
            kind: entry.wire_type.to_string(),
            id,
            attributes,
            relationships: (!relationships.is_empty()).then_some(relationships),
        })
    }
}
