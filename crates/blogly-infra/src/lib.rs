//! # Blogly Infrastructure
//!
//! Concrete implementations of the repository ports defined in `blogly-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::{DatabaseConfig, InMemoryBlogStore};
