//! Top-level document assembly.
//!
//! ```rust
//! use spindle_document::{DocumentAssembler, LinkBuilder, Primary, Record};
//! use spindle_schema::{Registry, RelationshipDescriptor, TypeEntry};
//!
//! let registry = Registry::builder()
//!     .register(
//!         TypeEntry::new("Post", "posts")
//!             .relationship(RelationshipDescriptor::to_one("author", "Author", "author_id")),
//!     )
//!     .register(TypeEntry::new("Author", "authors"))
//!     .build()
//!     .unwrap();
//!
//! let post = Record::new("Post", 1)
//!     .attr("title", "Hello")
//!     .attr("author_id", 5)
//!     .with_one("author", Some(Record::new("Author", 5).attr("name", "Ann")));
//!
//! let links = LinkBuilder::default();
//! let document = DocumentAssembler::new(&registry, &links)
//!     .assemble("Post", Primary::One(&post), &["author"])
//!     .unwrap();
//!
//! assert_eq!(document.included.unwrap().len(), 1);
//! ```

use tracing::debug;

use spindle_schema::Registry;

use crate::dedupe::dedupe;
use crate::error::DocumentResult;
use crate::include::IncludeTree;
use crate::links::LinkBuilder;
use crate::record::Record;
use crate::serializer::ResourceSerializer;
use crate::walker::walk;
use crate::wire::{Document, PrimaryData};

/// Root input of a document: one record or a collection.
#[derive(Debug, Clone, Copy)]
pub enum Primary<'a> {
    /// A single record; serialized as an object.
    One(&'a Record),
    /// A collection; serialized as an array.
    Many(&'a [Record]),
}

impl<'a> Primary<'a> {
    fn roots(&self) -> Vec<&'a Record> {
        match *self {
            Self::One(record) => vec![record],
            Self::Many(records) => records.iter().collect(),
        }
    }
}

/// Assembles `{data, included}` documents from loaded records.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'a> {
    registry: &'a Registry,
    links: &'a LinkBuilder,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler over a registry and link builder.
    pub fn new(registry: &'a Registry, links: &'a LinkBuilder) -> Self {
        Self { registry, links }
    }

    /// Assemble the document for `primary` records of `model`.
    ///
    /// `included` is present whenever at least one include path was given,
    /// even if every walked record turned out to be a placeholder.
    pub fn assemble<S: AsRef<str>>(
        &self,
        model: &str,
        primary: Primary<'_>,
        include_paths: &[S],
    ) -> DocumentResult<Document> {
        let tree = IncludeTree::parse(model, include_paths, self.registry);
        self.assemble_tree(model, primary, &tree)
    }

    /// Assemble from an already parsed include tree.
    pub fn assemble_tree(
        &self,
        model: &str,
        primary: Primary<'_>,
        tree: &IncludeTree,
    ) -> DocumentResult<Document> {
        let loaded = tree.loaded_relations(self.registry);
        let serializer = ResourceSerializer::new(self.registry, self.links);

        let data = match primary {
            Primary::One(record) => {
                PrimaryData::One(Box::new(serializer.serialize(model, record, &loaded)?))
            }
            Primary::Many(records) => PrimaryData::Many(
                records
                    .iter()
                    .map(|record| serializer.serialize(model, record, &loaded))
                    .collect::<DocumentResult<_>>()?,
            ),
        };

        if tree.is_empty() {
            return Ok(Document { data, included: None });
        }

        let roots = primary.roots();
        let mut walked = Vec::new();
        for path in tree.paths() {
            walked.extend(walk(self.registry, model, &roots, path.segments())?);
        }
        let reached = walked.len();
        let unique = dedupe(walked);

        debug!(
            model = model,
            paths = tree.paths().len(),
            reached = reached,
            included = unique.len(),
            "Resolved included resources"
        );

        let included = unique
            .into_iter()
            .map(|entry| serializer.serialize(entry.related_model, entry.record, &loaded))
            .collect::<DocumentResult<Vec<_>>>()?;

        Ok(Document {
            data,
            included: Some(included),
        })
    }
}
