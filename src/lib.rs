//! # Spindle
//!
//! Turns an already-loaded graph of records into JSON:API documents.
//!
//! Spindle provides:
//! - A registry of models, wire types and declared relationships
//! - Nested `include` resolution with deduplicated sideloading
//! - Cardinality-aware relationship linkage and links
//! - An async adapter over any data source that can load records
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spindle::prelude::*;
//!
//! let config = SpindleConfig::from_file("spindle.toml")?;
//! let adapter = JsonApiAdapter::from_config(&config, MyStore::connect().await?)?;
//!
//! let doc = adapter.get_by_id("Post", 1, &["author", "comments.author"]).await?;
//! println!("{}", serde_json::to_string_pretty(&doc)?);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Type registry and configuration.
pub mod schema {
    pub use spindle_schema::*;
}

pub use spindle_document::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::schema::{
        Cardinality, Registry, RelationshipDescriptor, SchemaError, SpindleConfig, TypeEntry,
    };
    pub use spindle_document::prelude::*;
}

// Re-export key schema types at the crate root
pub use schema::{Registry, SchemaError, SpindleConfig};
