//! SeaORM entities for the `users`, `posts`, `tags` and `posts_tags` tables.

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
