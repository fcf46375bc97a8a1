use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog post written by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
}

/// Input for creating a post under an existing user.
///
/// `tag_ids` may name tags that do not exist; only existing tags are linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<i32>,
}

/// Replacement values for an edited post. The tag selection replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<i32>,
}
