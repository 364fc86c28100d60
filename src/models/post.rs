//! Post model
//!
//! This module provides:
//! - `Post` as returned by the post API
//! - `PostInput`, the draft a create/edit form holds and submits

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A dog post as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier (assigned by the server)
    pub id: i64,
    /// Short title
    pub title: String,
    /// Free-text body
    pub content: String,
    /// Selected age category
    pub age_id: i64,
    /// Display label of the age category, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_value: Option<String>,
    /// Dog image URL
    pub image_url: String,
    /// Owner user ID
    pub user_id: i64,
    /// Creation timestamp (server local time)
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Last update timestamp (server local time)
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Post {
    /// Whether the given user owns this post
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Editable fields of a post.
///
/// `age_id` is optional only while the form is being filled in; validation
/// refuses to submit a draft without it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub age_id: Option<i64>,
    pub image_url: String,
}

impl PostInput {
    /// Create a fully populated draft
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        age_id: Option<i64>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            age_id,
            image_url: image_url.into(),
        }
    }
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            age_id: Some(post.age_id),
            image_url: post.image_url.clone(),
        }
    }
}
