//! # spindle-document
//!
//! JSON:API document assembly for already-loaded object graphs.
//!
//! This crate provides:
//! - Include path parsing (`include=posts.comments,author`)
//! - Relationship objects with `self`/`related` links and cardinality-aware linkage
//! - Resource serialization that never mutates the source records
//! - Depth-first include walking with `(type, id)` deduplication
//! - Top-level `{data, included}` assembly
//! - An async adapter over a pluggable [`DataSource`]
//!
//! ## Records
//!
//! Records carry attributes plus a *relation context*: relations the data
//! source configured on the instance, loaded or not.
//!
//! ```rust
//! use spindle_document::{Record, RelationValue};
//!
//! let post = Record::new("Post", 1)
//!     .attr("title", "Hello")
//!     .attr("author_id", 5)
//!     .with_unloaded("author")
//!     .with_many("comments", vec![Record::new("Comment", 10)]);
//!
//! assert!(post.has_relation("author"));
//! assert!(!post.related("author").unwrap().is_loaded());
//! assert!(matches!(post.related("comments"), Some(RelationValue::Many(_))));
//! ```
//!
//! ## Include Paths
//!
//! ```rust
//! use spindle_document::IncludePath;
//!
//! let path = IncludePath::parse(" posts . comments ").unwrap();
//! assert_eq!(path.head(), "posts");
//! assert_eq!(path.to_string(), "posts.comments");
//! assert!(IncludePath::parse("..").is_none());
//! ```
//!
//! ## Documents
//!
//! ```rust
//! use spindle_document::{DocumentAssembler, LinkBuilder, Primary, Record};
//! use spindle_schema::{Registry, RelationshipDescriptor, TypeEntry};
//!
//! let registry = Registry::builder()
//!     .register(
//!         TypeEntry::new("Author", "authors")
//!             .relationship(RelationshipDescriptor::to_many("posts", "Post")),
//!     )
//!     .register(TypeEntry::new("Post", "posts"))
//!     .build()
//!     .unwrap();
//!
//! let author = Record::new("Author", 1)
//!     .attr("name", "Ann")
//!     .with_many("posts", vec![Record::new("Post", 10), Record::new("Post", 11)]);
//!
//! let links = LinkBuilder::new("https://api.example.com");
//! let doc = DocumentAssembler::new(&registry, &links)
//!     .assemble("Author", Primary::One(&author), &["posts"])
//!     .unwrap();
//!
//! let value = doc.to_value().unwrap();
//! assert_eq!(value["data"]["relationships"]["posts"]["data"][1]["id"], "11");
//! assert_eq!(value["included"].as_array().unwrap().len(), 2);
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use spindle_document::{DocumentError, ErrorCode};
//!
//! let err = DocumentError::unregistered_type("Tag");
//! assert_eq!(err.code, ErrorCode::UnregisteredType);
//! assert!(err.to_string().starts_with("[J1001]"));
//! ```

pub mod adapter;
pub mod dedupe;
pub mod document;
pub mod error;
pub mod include;
pub mod links;
pub mod logging;
pub mod record;
pub mod serializer;
pub mod source;
pub mod walker;
pub mod wire;

pub use adapter::{AdapterOptions, JsonApiAdapter};
pub use dedupe::dedupe;
pub use document::{DocumentAssembler, Primary};
pub use error::{DocumentError, DocumentResult, ErrorCode, ErrorContext};
pub use include::{IncludePath, IncludeTree, LoadedRelations};
pub use links::LinkBuilder;
pub use record::{Record, RecordId, RelationValue};
pub use serializer::ResourceSerializer;
pub use source::{BoxError, BoxFuture, DataSource, FetchPlan};
pub use walker::{Walked, walk};
pub use wire::{
    Document, Linkage, PrimaryData, RelationshipData, RelationshipLinks, RelationshipObject,
    ResourceObject,
};

// Re-export logging utilities
pub use logging::{
    get_log_format, get_log_level, init as init_logging, init_from_config, is_debug_enabled,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::{AdapterOptions, JsonApiAdapter};
    pub use crate::document::{DocumentAssembler, Primary};
    pub use crate::error::{DocumentError, DocumentResult};
    pub use crate::include::IncludeTree;
    pub use crate::links::LinkBuilder;
    pub use crate::record::{Record, RecordId, RelationValue};
    pub use crate::source::{BoxError, BoxFuture, DataSource, FetchPlan};
    pub use crate::wire::{Document, RelationshipObject, ResourceObject};
}
