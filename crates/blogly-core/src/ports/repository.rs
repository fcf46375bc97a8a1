use async_trait::async_trait;

use crate::domain::{NewPost, NewTag, NewUser, Post, PostChanges, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining the lookups every entity supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Fetch every entity, ordered by ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// User repository.
///
/// Writes that touch several tables run in a single transaction.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Overwrite the mutable fields. Fails with [`RepoError::NotFound`] for an unknown id.
    async fn update(&self, id: i32, changes: NewUser) -> Result<User, RepoError>;

    /// Delete the user together with its posts and their tag links.
    async fn delete(&self, id: i32) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Posts owned by a user, oldest first.
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Posts linked to a tag.
    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Insert the post and link it to the existing tags among `post.tag_ids`.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Update title and content and replace the tag links, atomically.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete the post and its tag links.
    async fn delete(&self, id: i32) -> Result<Post, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    /// Tags whose id is in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RepoError>;

    /// Tags linked to a post.
    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError>;

    /// Fails with [`RepoError::Constraint`] when the name is taken.
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError>;

    async fn update(&self, id: i32, changes: NewTag) -> Result<Tag, RepoError>;

    /// Delete the tag and its links. Linked posts are kept.
    async fn delete(&self, id: i32) -> Result<Tag, RepoError>;
}
