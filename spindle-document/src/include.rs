//! Include path parsing.
//!
//! Clients request sideloading with dotted paths such as `posts.comments`.
//! [`IncludeTree::parse`] normalizes those paths and extracts the root-level
//! relation names the data source must eager-load. Deeper segments are not
//! validated here; the graph walker reports unknown relationships when it
//! reaches them.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use smol_str::SmolStr;
use tracing::trace;

use spindle_schema::Registry;

/// An ordered, non-empty chain of relation names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncludePath {
    segments: Vec<SmolStr>,
}

impl IncludePath {
    /// Parse a dotted path. Returns `None` when no non-empty segment remains.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<SmolStr> = path
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(SmolStr::new)
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// The first relation name.
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// All segments in order.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl std::fmt::Display for IncludePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Parsed include request for one root model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeTree {
    root: SmolStr,
    required: IndexSet<SmolStr>,
    paths: Vec<IncludePath>,
}

impl IncludeTree {
    /// Parse include paths requested against `root_model`.
    ///
    /// Never fails: unknown relation names are carried through and surface
    /// later as walk errors.
    pub fn parse<S: AsRef<str>>(root_model: &str, include_paths: &[S], _registry: &Registry) -> Self {
        let mut required = IndexSet::new();
        let mut paths = Vec::with_capacity(include_paths.len());
        let mut seen = HashSet::new();

        for path in include_paths.iter().filter_map(|p| IncludePath::parse(p.as_ref())) {
            if !seen.insert(path.clone()) {
                continue;
            }
            required.insert(SmolStr::new(path.head()));
            paths.push(path);
        }

        trace!(
            model = root_model,
            required = required.len(),
            paths = paths.len(),
            "Parsed include tree"
        );

        Self {
            root: SmolStr::new(root_model),
            required,
            paths,
        }
    }

    /// Root-level relation names, deduplicated, in first-seen order.
    pub fn required_relations(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(SmolStr::as_str)
    }

    /// Normalized include paths.
    pub fn paths(&self) -> &[IncludePath] {
        &self.paths
    }

    /// Check if no path was requested.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Build the per-model include context for this request.
    ///
    /// The root model is marked with every first segment. Each deeper segment
    /// is marked on the model its parent segment resolves to; resolution stops
    /// at the first segment the registry does not know.
    pub fn loaded_relations(&self, registry: &Registry) -> LoadedRelations {
        let mut loaded = LoadedRelations::new();

        for path in &self.paths {
            let mut model = self.root.clone();
            for segment in path.segments() {
                loaded.mark(model.as_str(), segment.as_str());
                match registry.relationship(&model, segment) {
                    Some(rel) => model = rel.related_model.clone(),
                    None => break,
                }
            }
        }

        loaded
    }
}

/// Which relation names were eager-loaded, per model, for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRelations {
    models: HashMap<SmolStr, HashSet<SmolStr>>,
}

impl LoadedRelations {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Context marking a single relation on a single model.
    pub fn single(model: &str, relation: &str) -> Self {
        let mut loaded = Self::new();
        loaded.mark(model, relation);
        loaded
    }

    /// Mark `relation` as loaded for records of `model`.
    pub fn mark(&mut self, model: &str, relation: &str) {
        self.models
            .entry(SmolStr::new(model))
            .or_default()
            .insert(SmolStr::new(relation));
    }

    /// Check if `relation` was loaded for records of `model`.
    pub fn is_loaded(&self, model: &str, relation: &str) -> bool {
        self.models
            .get(model)
            .is_some_and(|relations| relations.contains(relation))
    }
}
