use std::fmt;

use serde::{Deserialize, Serialize};

/// Profile picture used when a user is saved without one.
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_960_720.png";

/// User entity - the author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    /// First and last name separated by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Fields of a user as submitted by a form, used both for creation and for edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl NewUser {
    /// Build the input, substituting [`DEFAULT_IMAGE_URL`] for a blank image URL.
    pub fn new(first_name: String, last_name: String, image_url: Option<String>) -> Self {
        let image_url = image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Self {
            first_name,
            last_name,
            image_url,
        }
    }
}
