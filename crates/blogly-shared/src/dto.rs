//! Form bodies submitted by the HTML pages.
//!
//! Field names follow the form inputs (`first-name`, `tags`, ...). Tag
//! selections arrive as repeated keys (`tags=1&tags=3`).

use serde::Deserialize;
use serde::de::DeserializeOwned;

use blogly_core::domain::{NewPost, NewTag, NewUser, PostChanges};

/// A form body that could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("Invalid form submission: {0}")]
pub struct FormError(String);

/// Decode an `application/x-www-form-urlencoded` body.
pub fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, FormError> {
    serde_html_form::from_bytes(body).map_err(|e| FormError(e.to_string()))
}

/// Create/edit user form.
#[derive(Debug, Clone, Deserialize)]
pub struct UserForm {
    #[serde(rename = "first-name")]
    pub first_name: String,
    #[serde(rename = "last-name")]
    pub last_name: String,
    #[serde(rename = "image-url", default)]
    pub image_url: Option<String>,
}

impl From<UserForm> for NewUser {
    fn from(form: UserForm) -> Self {
        NewUser::new(form.first_name, form.last_name, form.image_url)
    }
}

/// Create/edit post form.
#[derive(Debug, Clone, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<i32>,
}

impl PostForm {
    pub fn into_new_post(self, user_id: i32) -> NewPost {
        NewPost {
            user_id,
            title: self.title,
            content: self.content,
            tag_ids: self.tags,
        }
    }
}

impl From<PostForm> for PostChanges {
    fn from(form: PostForm) -> Self {
        PostChanges {
            title: form.title,
            content: form.content,
            tag_ids: form.tags,
        }
    }
}

/// Create/edit tag form.
#[derive(Debug, Clone, Deserialize)]
pub struct TagForm {
    pub name: String,
}

impl From<TagForm> for NewTag {
    fn from(form: TagForm) -> Self {
        NewTag { name: form.name }
    }
}
