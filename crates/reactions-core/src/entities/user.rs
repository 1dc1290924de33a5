//! User entity - the reactor side of a reaction
//!
//! Only the fields the "who reacted" read path needs; the application
//! owning the users table is free to carry more.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// A user capable of reacting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
