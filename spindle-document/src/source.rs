//! The data-source contract the adapter fetches through.
//!
//! Spindle never talks to a store directly. Whatever executes queries
//! implements [`DataSource`] and hands back records whose relations are
//! already loaded according to the [`FetchPlan`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::include::{IncludePath, IncludeTree};
use crate::record::{Record, RecordId};

/// A boxed future for async data-source calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type returned by data sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What the data source must eager-load for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchPlan {
    /// Relations to load on the fetched records.
    pub relations: Vec<SmolStr>,
    /// Full include paths, for sources that load nested relations too.
    pub paths: Vec<IncludePath>,
}

impl FetchPlan {
    /// A plan that loads nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A plan that loads a single relation.
    pub fn relation(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        Self {
            paths: IncludePath::parse(&name).into_iter().collect(),
            relations: vec![name],
        }
    }

    /// Whether nothing needs loading.
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Whether `name` must be loaded on the fetched records.
    pub fn includes(&self, name: &str) -> bool {
        self.relations.iter().any(|r| r == name)
    }
}

impl From<&IncludeTree> for FetchPlan {
    fn from(tree: &IncludeTree) -> Self {
        Self {
            relations: tree.required_relations().map(SmolStr::new).collect(),
            paths: tree.paths().to_vec(),
        }
    }
}

/// Loads records for the adapter.
///
/// Implementations return `Ok(None)` from [`fetch_one`](Self::fetch_one)
/// when no record matches; errors are reserved for failures of the store.
pub trait DataSource: Send + Sync {
    /// Fetch one record of `model` by id.
    fn fetch_one<'a>(
        &'a self,
        model: &'a str,
        id: &'a RecordId,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Option<Record>, BoxError>>;

    /// Fetch every record of `model`.
    fn fetch_all<'a>(
        &'a self,
        model: &'a str,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Vec<Record>, BoxError>>;
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn fetch_one<'a>(
        &'a self,
        model: &'a str,
        id: &'a RecordId,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Option<Record>, BoxError>> {
        (**self).fetch_one(model, id, plan)
    }

    fn fetch_all<'a>(
        &'a self,
        model: &'a str,
        plan: &'a FetchPlan,
    ) -> BoxFuture<'a, Result<Vec<Record>, BoxError>> {
        (**self).fetch_all(model, plan)
    }
}
