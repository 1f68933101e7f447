//! Integration tests for the async adapter against an in-memory data source.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use spindle::prelude::*;
use spindle::RelationshipData;

/// In-memory store holding fully loaded records.
///
/// Top-level relations missing from the fetch plan are handed back unloaded,
/// the way a real store would skip the join.
#[derive(Default)]
struct MemoryStore {
    tables: HashMap<String, Vec<Record>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    fn insert(mut self, record: Record) -> Self {
        self.tables.entry(record.model.to_string()).or_default().push(record);
        self
    }

    fn shape(record: &Record, plan: &FetchPlan) -> Record {
        let mut record = record.clone();
        for (name, value) in record.relations.iter_mut() {
            if !plan.includes(name) {
                *value = RelationValue::Unloaded;
            }
        }
        record
    }
}

impl DataSource for MemoryStore {
    fn fetch_one<'a>(
        &'a self,
        model: &'a str,
        id: &'a RecordId,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Option<Record>, BoxError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let found = self
                .tables
                .get(model)
                .and_then(|rows| rows.iter().find(|r| r.id.as_ref() == Some(id)))
                .map(|r| Self::shape(r, plan));
            Ok(found)
        })
    }

    fn fetch_all<'a>(
        &'a self,
        model: &'a str,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Vec<Record>, BoxError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let rows = self
                .tables
                .get(model)
                .map(|rows| rows.iter().map(|r| Self::shape(r, plan)).collect())
                .unwrap_or_default();
            Ok(rows)
        })
    }
}

/// Store that always fails.
struct BrokenStore;

impl DataSource for BrokenStore {
    fn fetch_one<'a>(
        &'a self,
        _model: &'a str,
        _id: &'a RecordId,
        _plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Option<Record>, BoxError>> {
        Box::pin(async { Err(BoxError::from("database is down")) })
    }

    fn fetch_all<'a>(
        &'a self,
        _model: &'a str,
        _plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Vec<Record>, BoxError>> {
        Box::pin(async { Err(BoxError::from("database is down")) })
    }
}

fn registry() -> Registry {
    Registry::builder()
        .register(
            TypeEntry::new("Post", "posts")
                .relationship(RelationshipDescriptor::to_one("author", "Author", "author_id"))
                .relationship(RelationshipDescriptor::to_many("comments", "Comment")),
        )
        .register(
            TypeEntry::new("Author", "authors")
                .relationship(RelationshipDescriptor::to_many("posts", "Post")),
        )
        .register(
            TypeEntry::new("Comment", "comments")
                .relationship(RelationshipDescriptor::to_one("author", "Author", "author_id")),
        )
        .build()
        .expect("valid registry")
}

fn store() -> MemoryStore {
    let ann = Record::new("Author", 5).attr("name", "Ann");
    let bob = Record::new("Author", 6).attr("name", "Bob");

    MemoryStore::default()
        .insert(
            Record::new("Post", 1)
                .attr("title", "Hello")
                .attr("author_id", 5)
                .with_one("author", Some(ann.clone()))
                .with_many(
                    "comments",
                    vec![
                        Record::new("Comment", 10)
                            .attr("body", "First")
                            .attr("author_id", 6)
                            .with_one("author", Some(bob.clone())),
                        Record::new("Comment", 11)
                            .attr("body", "Second")
                            .attr("author_id", 5)
                            .with_one("author", Some(ann.clone())),
                    ],
                ),
        )
        .insert(
            Record::new("Post", 2)
                .attr("title", "Draft")
                .attr("author_id", serde_json::Value::Null)
                .with_one("author", None)
                .with_many("comments", vec![]),
        )
        .insert(ann)
}

fn adapter() -> JsonApiAdapter<MemoryStore> {
    JsonApiAdapter::new(registry(), store(), AdapterOptions::new("https://api.example.com"))
        .expect("adapter")
}

#[tokio::test]
async fn test_get_by_id_with_nested_includes() {
    let adapter = adapter();
    let doc = adapter
        .get_by_id("Post", 1, &["author", "comments.author"])
        .await
        .expect("fetch")
        .expect("found");

    let value = doc.to_value().expect("json");
    assert_eq!(
        value["data"]["relationships"]["comments"]["data"],
        json!([{"type": "comments", "id": "10"}, {"type": "comments", "id": "11"}])
    );

    let mut included: Vec<(String, String)> = doc
        .included
        .expect("included")
        .into_iter()
        .map(|r| (r.kind, r.id))
        .collect();
    included.sort();
    assert_eq!(
        included,
        vec![
            ("authors".to_string(), "5".to_string()),
            ("authors".to_string(), "6".to_string()),
            ("comments".to_string(), "10".to_string()),
            ("comments".to_string(), "11".to_string()),
        ]
    );
    assert_eq!(adapter.source().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_get_by_id_without_includes() {
    let doc = adapter()
        .get_by_id::<&str>("Post", 1, &[])
        .await
        .expect("fetch")
        .expect("found");

    assert!(doc.included.is_none());
    let value = doc.to_value().expect("json");
    assert!(value["data"]["relationships"]["comments"].get("data").is_none());
    assert_eq!(
        value["data"]["relationships"]["author"]["data"],
        json!({"type": "authors", "id": "5"})
    );
}

#[tokio::test]
async fn test_get_collection() {
    let doc = adapter().get("Post", &["author"]).await.expect("fetch");

    assert_eq!(doc.data.resources().len(), 2);
    let value = doc.to_value().expect("json");
    assert_eq!(value["data"][1]["relationships"]["author"]["data"], json!(null));
    assert_eq!(value["included"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_get_empty_collection() {
    let doc = adapter().get::<&str>("Comment", &[]).await.expect("fetch");
    assert_eq!(doc.to_value().expect("json"), json!({"data": []}));
}

#[tokio::test]
async fn test_get_by_id_missing_record() {
    let doc = adapter().get_by_id::<&str>("Post", 99, &[]).await.expect("fetch");
    assert!(doc.is_none());
}

#[tokio::test]
async fn test_unregistered_model() {
    let err = adapter()
        .get_by_id::<&str>("Tag", 1, &[])
        .await
        .expect_err("unregistered");
    assert!(err.is_unregistered_type());
    assert_eq!(err.code.code(), "J1001");
}

#[tokio::test]
async fn test_fetch_relationship_endpoint() {
    let adapter = adapter();

    let author = adapter
        .fetch_relationship("Post", 1, "author")
        .await
        .expect("fetch")
        .expect("relationship");
    assert_eq!(
        serde_json::to_value(&author).expect("json"),
        json!({
            "links": {
                "self": "https://api.example.com/posts/1/relationships/author",
                "related": "https://api.example.com/posts/1/author"
            },
            "data": {"type": "authors", "id": "5"}
        })
    );

    let comments = adapter
        .fetch_relationship("Post", 2, "comments")
        .await
        .expect("fetch")
        .expect("relationship");
    assert_eq!(comments.data, Some(RelationshipData::Many(vec![])));

    assert!(adapter
        .fetch_relationship("Post", 1, "tags")
        .await
        .expect("fetch")
        .is_none());
    assert!(adapter
        .fetch_relationship("Post", 42, "author")
        .await
        .expect("fetch")
        .is_none());
}

#[tokio::test]
async fn test_fetch_failure_is_reported() {
    let adapter =
        JsonApiAdapter::new(registry(), BrokenStore, AdapterOptions::default()).expect("adapter");

    let err = adapter.get::<&str>("Post", &[]).await.expect_err("fetch failure");
    assert!(err.is_fetch_error());
    assert!(err.to_string().contains("database is down"));

    let err = adapter
        .fetch_relationship("Post", 1, "comments")
        .await
        .expect_err("fetch failure");
    assert_eq!(err.context.relation.as_deref(), Some("comments"));
}

#[tokio::test]
async fn test_adapters_share_registry() {
    let registry = Arc::new(registry());
    let first = JsonApiAdapter::new(Arc::clone(&registry), store(), AdapterOptions::default())
        .expect("adapter");
    let second = JsonApiAdapter::new(
        Arc::clone(&registry),
        Arc::new(store()),
        AdapterOptions::new("https://other.example.com"),
    )
    .expect("adapter");

    let (a, b) = tokio::join!(
        first.fetch_relationship("Post", 1, "author"),
        second.fetch_relationship("Post", 1, "author"),
    );

    let a = a.expect("fetch").expect("relationship");
    let b = b.expect("fetch").expect("relationship");
    assert_eq!(a.data, b.data);
    assert_eq!(a.links.related, "/posts/1/author");
    assert_eq!(b.links.related, "https://other.example.com/posts/1/author");
}
