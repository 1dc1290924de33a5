//! User entity <-> model mapper

use reactions_core::{User, UserId};

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            created_at: model.created_at,
        }
    }
}
