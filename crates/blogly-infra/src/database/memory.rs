//! In-memory repositories - used when no database is configured.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blogly_core::domain::{NewPost, NewTag, NewUser, Post, PostChanges, Tag, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    tags: BTreeMap<i32, Tag>,
    /// (post_id, tag_id)
    posts_tags: BTreeSet<(i32, i32)>,
    next_user_id: i32,
    next_post_id: i32,
    next_tag_id: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn link_tags(&mut self, post_id: i32, tag_ids: &[i32]) {
        for tag_id in tag_ids {
            if self.tags.contains_key(tag_id) {
                self.posts_tags.insert((post_id, *tag_id));
            }
        }
    }

    fn unlink_post(&mut self, post_id: i32) {
        self.posts_tags.retain(|(p, _)| *p != post_id);
    }

    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.tags
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }
}

/// All three repositories over one shared set of tables.
///
/// Every operation holds the table lock for its whole duration.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryBlogStore {
    tables: RwLock<Tables>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let id = Tables::next_id(&mut tables.next_user_id);
        let user = User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id).ok_or(RepoError::NotFound)?;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        user.image_url = changes.image_url;
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let user = tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let owned: Vec<i32> = tables
            .posts
            .values()
            .filter(|p| p.user_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.unlink_post(post_id);
            tables.posts.remove(&post_id);
        }

        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .filter_map(|(p, _)| tables.posts.get(p).cloned())
            .collect())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.user_id) {
            return Err(RepoError::Constraint(format!(
                "user {} does not exist",
                post.user_id
            )));
        }

        let id = Tables::next_id(&mut tables.next_post_id);
        let created = Post {
            id,
            title: post.title,
            content: post.content,
            created_at: Utc::now(),
            user_id: post.user_id,
        };
        tables.posts.insert(id, created.clone());
        tables.link_tags(id, &post.tag_ids);
        Ok(created)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.title = changes.title;
        post.content = changes.content;
        let updated = post.clone();

        tables.unlink_post(id);
        tables.link_tags(id, &changes.tag_ids);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        tables.unlink_post(id);
        Ok(post)
    }
}

#[async_trait]
impl BaseRepository<Tag, i32> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let wanted: BTreeSet<i32> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| tables.tags.get(&id).cloned())
            .collect())
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts_tags
            .range((post_id, i32::MIN)..=(post_id, i32::MAX))
            .filter_map(|(_, t)| tables.tags.get(t).cloned())
            .collect())
    }

    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&tag.name, None) {
            return Err(RepoError::Constraint(format!(
                "tag name '{}' already exists",
                tag.name
            )));
        }

        let id = Tables::next_id(&mut tables.next_tag_id);
        let created = Tag { id, name: tag.name };
        tables.tags.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        if tables.name_taken(&changes.name, Some(id)) {
            return Err(RepoError::Constraint(format!(
                "tag name '{}' already exists",
                changes.name
            )));
        }

        let tag = tables.tags.get_mut(&id).ok_or(RepoError::NotFound)?;
        tag.name = changes.name;
        Ok(tag.clone())
    }

    async fn delete(&self, id: i32) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        let tag = tables.tags.remove(&id).ok_or(RepoError::NotFound)?;
        tables.posts_tags.retain(|(_, t)| *t != id);
        Ok(tag)
    }
}
