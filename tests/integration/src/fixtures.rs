//! Test fixtures
//!
//! Reactable entity types with different aggregation policies, and user
//! builders.

use chrono::Utc;
use reactions_core::{AggregateOp, AggregationRule, Reactable, ReactionOptions, User, UserId};

/// Blog post: maintains a `vote_sum` column and a `rating_avg` column.
/// Everything else (e.g. "like") is unconfigured and falls back to counting.
pub struct Post;

impl Reactable for Post {
    const KIND: &'static str = "post";
    const TABLE: &'static str = "posts";

    fn reaction_options() -> ReactionOptions {
        ReactionOptions::new()
            .with("vote", AggregationRule::enabled(AggregateOp::Sum))
            .with("rating", AggregationRule::enabled(AggregateOp::Avg))
    }
}

/// Article: has a rule for "like" but with column maintenance disabled,
/// so no column is ever written and summaries count rows.
pub struct Article;

impl Reactable for Article {
    const KIND: &'static str = "article";
    const TABLE: &'static str = "articles";

    fn reaction_options() -> ReactionOptions {
        ReactionOptions::new().with("like", AggregationRule::disabled(AggregateOp::Sum))
    }
}

/// Build a test user
pub fn user(id: i64) -> User {
    User {
        id: UserId::new(id),
        username: format!("user{id}"),
        created_at: Utc::now(),
    }
}
