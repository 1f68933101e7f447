//! Canonicalization of walked records into a unique `(type, id)` set.

use std::collections::HashSet;

use crate::walker::Walked;

/// Keep the first occurrence of each `related_model-id` pair and drop records
/// that carry no id.
pub fn dedupe<'a>(entries: impl IntoIterator<Item = Walked<'a>>) -> Vec<Walked<'a>> {
    let mut seen = HashSet::new();

    entries
        .into_iter()
        .filter(|entry| {
            entry
                .record
                .id
                .as_ref()
                .is_some_and(|id| seen.insert(format!("{}-{}", entry.related_model, id)))
        })
        .collect()
}
