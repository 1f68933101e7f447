//! Depth-first traversal of include paths over the loaded graph.

use smol_str::SmolStr;

use spindle_schema::Registry;

use crate::error::{DocumentError, DocumentResult};
use crate::record::Record;

/// One related record reached while walking an include path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walked<'a> {
    /// The relation the record was reached through.
    pub relation_name: &'a str,
    /// Registry name of the record's model.
    pub related_model: &'a str,
    /// The related record.
    pub record: &'a Record,
}

/// Follow `path` from `roots` (all of `model`) and return every related record
/// reached, leaves and intermediates alike.
///
/// Only records the data source already loaded are visited. Id-less
/// placeholders are returned but never recursed into. Sibling order is not
/// significant; callers deduplicate the result.
pub fn walk<'a>(
    registry: &'a Registry,
    model: &str,
    roots: &[&'a Record],
    path: &[SmolStr],
) -> DocumentResult<Vec<Walked<'a>>> {
    let Some((head, rest)) = path.split_first() else {
        return Ok(Vec::new());
    };

    let descriptor = registry
        .relationship(model, head)
        .ok_or_else(|| DocumentError::unknown_relationship(model, head.as_str()))?;

    let mut out = Vec::new();
    for root in roots {
        let Some(value) = root.related(head) else {
            continue;
        };

        for record in value.records() {
            out.push(Walked {
                relation_name: descriptor.name.as_str(),
                related_model: descriptor.related_model.as_str(),
                record,
            });

            if !rest.is_empty() && record.id.is_some() {
                out.extend(walk(registry, &descriptor.related_model, &[record], rest)?);
            }
        }
    }

    crate::spindle_trace!(
        model = model,
        relation = head.as_str(),
        roots = roots.len(),
        reached = out.len(),
        "Walked include segment"
    );

    Ok(out)
}
