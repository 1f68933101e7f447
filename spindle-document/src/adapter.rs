//! Async entrypoints wiring a [`DataSource`] to document assembly.
//!
//! The adapter is the only async surface in the crate. Each entrypoint makes
//! exactly one data-source call and then runs the synchronous transform.
//!
//! # Example
//!
//! ```rust,ignore
//! use spindle_document::{AdapterOptions, JsonApiAdapter};
//!
//! let adapter = JsonApiAdapter::new(registry, source, AdapterOptions::new("https://api.example.com"))?;
//!
//! let doc = adapter.get_by_id("Post", 1, &["author", "comments.author"]).await?;
//! let rel = adapter.fetch_relationship("Post", 1, "comments").await?;
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use spindle_schema::config::DocumentConfig;
use spindle_schema::{Cardinality, Registry, SpindleConfig};

use crate::document::{DocumentAssembler, Primary};
use crate::error::{DocumentError, DocumentResult};
use crate::include::{IncludeTree, LoadedRelations};
use crate::links::LinkBuilder;
use crate::record::RecordId;
use crate::source::{DataSource, FetchPlan};
use crate::wire::{Document, RelationshipObject};

/// Options for a [`JsonApiAdapter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Prefix for every relationship link.
    pub base_url: String,
}

impl AdapterOptions {
    /// Create options with a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl From<&DocumentConfig> for AdapterOptions {
    fn from(config: &DocumentConfig) -> Self {
        Self::new(config.base_url.as_str())
    }
}

impl From<&SpindleConfig> for AdapterOptions {
    fn from(config: &SpindleConfig) -> Self {
        Self::from(&config.document)
    }
}

/// Serves JSON:API documents for the models of one registry.
pub struct JsonApiAdapter<S: DataSource> {
    registry: Arc<Registry>,
    source: S,
    links: LinkBuilder,
}

impl<S: DataSource> JsonApiAdapter<S> {
    /// Create an adapter.
    pub fn new(
        registry: impl Into<Arc<Registry>>,
        source: S,
        options: AdapterOptions,
    ) -> DocumentResult<Self> {
        let registry = registry.into();
        if registry.is_empty() {
            return Err(DocumentError::configuration("no models registered"));
        }

        debug!(
            types = registry.len(),
            base_url = %options.base_url,
            "Created JSON:API adapter"
        );

        Ok(Self {
            registry,
            source,
            links: LinkBuilder::new(options.base_url),
        })
    }

    /// Create an adapter from a parsed `spindle.toml`.
    pub fn from_config(config: &SpindleConfig, source: S) -> DocumentResult<Self> {
        let registry = config.registry()?;
        Self::new(registry, source, AdapterOptions::from(config))
    }

    /// The registry this adapter serves.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every record of `model` and assemble a collection document.
    pub async fn get<I: AsRef<str>>(
        &self,
        model: &str,
        include_paths: &[I],
    ) -> DocumentResult<Document> {
        self.ensure_registered(model)?;
        let tree = IncludeTree::parse(model, include_paths, &self.registry);
        let plan = FetchPlan::from(&tree);

        let records = self.source.fetch_all(model, &plan).await.map_err(|e| {
            warn!(model = model, error = %e, "Data source failed to fetch collection");
            DocumentError::fetch(model, e).with_context("get")
        })?;

        crate::spindle_debug!(model = model, count = records.len(), "Fetched collection");

        DocumentAssembler::new(&self.registry, &self.links).assemble_tree(
            model,
            Primary::Many(&records),
            &tree,
        )
    }

    /// Fetch one record and assemble its document. `Ok(None)` when not found.
    pub async fn get_by_id<I: AsRef<str>>(
        &self,
        model: &str,
        id: impl Into<RecordId>,
        include_paths: &[I],
    ) -> DocumentResult<Option<Document>> {
        self.ensure_registered(model)?;
        let id = id.into();
        let tree = IncludeTree::parse(model, include_paths, &self.registry);
        let plan = FetchPlan::from(&tree);

        let record = self.source.fetch_one(model, &id, &plan).await.map_err(|e| {
            warn!(model = model, id = %id, error = %e, "Data source failed to fetch record");
            DocumentError::fetch(model, e).with_context("get_by_id")
        })?;

        let Some(record) = record else {
            debug!(model = model, id = %id, "Record not found");
            return Ok(None);
        };

        DocumentAssembler::new(&self.registry, &self.links)
            .assemble_tree(model, Primary::One(&record), &tree)
            .map(Some)
    }

    /// Fetch a single relationship object of one record.
    ///
    /// Unknown models, unknown relations and missing records all resolve to
    /// `Ok(None)`.
    pub async fn fetch_relationship(
        &self,
        model: &str,
        id: impl Into<RecordId>,
        relation: &str,
    ) -> DocumentResult<Option<RelationshipObject>> {
        let Some(descriptor) = self.registry.relationship(model, relation) else {
            debug!(model = model, relation = relation, "Relationship not declared");
            return Ok(None);
        };
        let id = id.into();

        // Only a foreign-key-backed to-one can be linked without loading it.
        let plan = match (descriptor.cardinality, &descriptor.foreign_key) {
            (Cardinality::ToOne, Some(_)) => FetchPlan::empty(),
            _ => FetchPlan::relation(relation),
        };

        let record = self.source.fetch_one(model, &id, &plan).await.map_err(|e| {
            warn!(
                model = model,
                id = %id,
                relation = relation,
                error = %e,
                "Data source failed to fetch relationship"
            );
            DocumentError::fetch(model, e)
                .with_context("fetch_relationship")
                .with_relation(relation)
        })?;

        let Some(mut record) = record else {
            return Ok(None);
        };
        if !record.has_relation(relation) {
            record = record.with_unloaded(relation);
        }

        let loaded = LoadedRelations::single(model, relation);
        self.links.build(
            &self.registry,
            model,
            &record,
            relation,
            descriptor,
            loaded.is_loaded(model, relation),
        )
    }

    fn ensure_registered(&self, model: &str) -> DocumentResult<()> {
        if self.registry.contains(model) {
            Ok(())
        } else {
            Err(DocumentError::unregistered_type(model))
        }
    }
}

impl<S: DataSource> std::fmt::Debug for JsonApiAdapter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonApiAdapter")
            .field("types", &self.registry.len())
            .field("base_url", &self.links.base_url())
            .finish()
    }
}
