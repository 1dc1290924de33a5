//! Aggregation policy for reaction types
//!
//! Each reactable type declares, per reaction type, whether a denormalized
//! aggregate column is maintained and which aggregate function feeds it.
//! Summary computation falls back to `count` for anything unconfigured.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Aggregate function applied over a reaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Count,
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    /// All supported operations
    pub const ALL: [AggregateOp; 5] = [Self::Sum, Self::Count, Self::Avg, Self::Min, Self::Max];

    /// `count` aggregates over row ids; everything else over the `value` column
    #[must_use]
    pub fn is_value_based(self) -> bool {
        !matches!(self, Self::Count)
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Count => write!(f, "count"),
            Self::Avg => write!(f, "avg"),
            Self::Min => write!(f, "min"),
            Self::Max => write!(f, "max"),
        }
    }
}

/// Error when parsing an [`AggregateOp`] from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid aggregate operation: {0}")]
pub struct AggregateOpParseError(pub String);

impl std::str::FromStr for AggregateOp {
    type Err = AggregateOpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "count" => Ok(Self::Count),
            "avg" => Ok(Self::Avg),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            other => Err(AggregateOpParseError(other.to_string())),
        }
    }
}

/// Aggregation settings for a single reaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRule {
    /// Whether the denormalized `{type}_{operation}` column is maintained
    pub enabled: bool,
    /// Aggregate function for the column and the summary
    pub operation: AggregateOp,
}

impl AggregationRule {
    /// Rule with column maintenance enabled
    #[must_use]
    pub fn enabled(operation: AggregateOp) -> Self {
        Self {
            enabled: true,
            operation,
        }
    }

    /// Rule that is configured but does not maintain a column
    #[must_use]
    pub fn disabled(operation: AggregateOp) -> Self {
        Self {
            enabled: false,
            operation,
        }
    }
}

/// Per-reactable-type mapping of reaction type to aggregation rule
///
/// Declared once per entity type through
/// [`Reactable::reaction_options`](crate::traits::Reactable::reaction_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionOptions {
    rules: BTreeMap<String, AggregationRule>,
}

impl ReactionOptions {
    /// Empty options: every type falls back to `count` summaries and no
    /// columns are maintained
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for a reaction type
    #[must_use]
    pub fn with(mut self, reaction_type: impl Into<String>, rule: AggregationRule) -> Self {
        self.rules.insert(reaction_type.into(), rule);
        self
    }

    /// Look up the configured rule for a reaction type, if any
    #[must_use]
    pub fn aggregation(&self, reaction_type: &str) -> Option<AggregationRule> {
        self.rules.get(reaction_type).copied()
    }

    /// Operation used for the summary of a reaction type
    ///
    /// Unconfigured or disabled types count rows.
    #[must_use]
    pub fn summary_operation(&self, reaction_type: &str) -> AggregateOp {
        match self.aggregation(reaction_type) {
            Some(rule) if rule.enabled => rule.operation,
            _ => AggregateOp::Count,
        }
    }

    /// Name of the denormalized column for an enabled reaction type
    #[must_use]
    pub fn column_name(&self, reaction_type: &str) -> Option<String> {
        self.aggregation(reaction_type)
            .filter(|rule| rule.enabled)
            .map(|rule| format!("{reaction_type}_{}", rule.operation))
    }

    /// Iterate over the configured (type, rule) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, AggregationRule)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
