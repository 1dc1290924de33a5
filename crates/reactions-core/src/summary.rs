//! Reaction summary computation
//!
//! A summary maps each reaction type present on a reactable to one aggregate
//! number. Two evaluation paths exist: this in-memory one for an already
//! loaded reaction collection, and a grouped SQL query in the database layer
//! for the cold path. Both must produce the same mapping; NULL `value`
//! fields are ignored by the value-based aggregates, exactly like SQL
//! aggregate functions do.

use std::collections::BTreeMap;

use crate::aggregation::{AggregateOp, ReactionOptions};
use crate::entities::Reaction;

/// Mapping of reaction type to its aggregate value
pub type ReactionSummary = BTreeMap<String, f64>;

/// Compute the summary from an in-memory reaction collection
#[must_use]
pub fn summarize_loaded(options: &ReactionOptions, reactions: &[Reaction]) -> ReactionSummary {
    let mut groups: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for reaction in reactions {
        groups
            .entry(reaction.reaction_type.as_str())
            .or_default()
            .push(reaction.value);
    }

    groups
        .into_iter()
        .map(|(reaction_type, values)| {
            let op = options.summary_operation(reaction_type);
            (reaction_type.to_string(), apply(op, &values))
        })
        .collect()
}

/// Apply an aggregate operation over the `value` fields of one type group
fn apply(op: AggregateOp, values: &[Option<f64>]) -> f64 {
    let present: Vec<f64> = values.iter().copied().flatten().collect();
    match op {
        AggregateOp::Count => values.len() as f64,
        AggregateOp::Sum => present.iter().sum(),
        AggregateOp::Avg => {
            if present.is_empty() {
                0.0
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            }
        }
        AggregateOp::Min => present.iter().copied().reduce(f64::min).unwrap_or(0.0),
        AggregateOp::Max => present.iter().copied().reduce(f64::max).unwrap_or(0.0),
    }
}
