//! PostgreSQL repository implementations.
//!
//! Dependent rows are removed explicitly, inside the same transaction as their parent.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use blogly_core::domain::{NewPost, NewTag, NewUser, Post, PostChanges, Tag, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image_url: Set(user.image_url),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: NewUser) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active = UserEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();
        active.first_name = Set(changes.first_name);
        active.last_name = Set(changes.last_name);
        active.image_url = Set(changes.image_url);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<User, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = UserEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let post_ids: Vec<i32> = PostEntity::find()
            .filter(post::Column::UserId.eq(id))
            .all(&txn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if !post_ids.is_empty() {
            PostTagEntity::delete_many()
                .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
            PostEntity::delete_many()
                .filter(post::Column::UserId.eq(id))
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(user_id = id, posts = post_ids.len(), "User deleted");
        Ok(model.into())
    }
}

/// Link `post_id` to every existing tag among `tag_ids`.
async fn link_tags<C>(conn: &C, post_id: i32, tag_ids: &[i32]) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let wanted: BTreeSet<i32> = tag_ids.iter().copied().collect();
    if wanted.is_empty() {
        return Ok(());
    }

    let tags = TagEntity::find()
        .filter(tag::Column::Id.is_in(wanted))
        .all(conn)
        .await
        .map_err(map_db_err)?;
    if tags.is_empty() {
        return Ok(());
    }

    let links = tags.into_iter().map(|t| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(t.id),
    });
    PostTagEntity::insert_many(links)
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel {
            title: Set(post.title),
            content: Set(post.content),
            created_at: Set(Utc::now().into()),
            user_id: Set(post.user_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;
        link_tags(&txn, model.id, &post.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(post_id = model.id, user_id = model.user_id, "Post created");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();
        active.title = Set(changes.title);
        active.content = Set(changes.content);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        link_tags(&txn, id, &changes.tag_ids).await?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Tag>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = TagEntity::find()
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            name: Set(tag.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: NewTag) -> Result<Tag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut active = TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?
            .into_active_model();
        active.name = Set(changes.name);
        let model = active.update(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<Tag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let unlinked = PostTagEntity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(tag_id = id, unlinked = unlinked.rows_affected, "Tag deleted");
        Ok(model.into())
    }
}
