//! Blog content records: posts, categories, tags and their join rows.
//!
//! # Responsibility
//! - Define the read/insert shapes for everything addressed by slug on the
//!   blog side of the site.
//!
//! # Invariants
//! - `Post.published_at` drives every "newest first" listing.
//! - `featured` defaults to `false` when the caller omits it.
//! - `PostTag` rows are the only representation of the post/tag relation.

use crate::model::{EntityId, EpochMillis};
use serde::{Deserialize, Serialize};

/// Published article as served to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    /// Unique URL-safe addressing key.
    pub slug: String,
    pub excerpt: String,
    /// Full markdown body.
    pub content: String,
    pub cover_image: String,
    /// Publication timestamp in epoch milliseconds.
    pub published_at: EpochMillis,
    /// Promotional placement flag (homepage etc.).
    pub featured: bool,
    /// Estimated reading time in minutes.
    pub reading_time: i64,
    pub category_id: EntityId,
    /// Referential integrity for authors is the caller's concern.
    pub author_id: EntityId,
}

/// Insert shape for [`Post`]. The store assigns `id` and merges defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub published_at: EpochMillis,
    /// `None` means "not featured".
    #[serde(default)]
    pub featured: Option<bool>,
    pub reading_time: i64,
    pub category_id: EntityId,
    pub author_id: EntityId,
}

/// Editorial category grouping posts and projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Icon key rendered by the site, e.g. `database`.
    pub icon: String,
    /// Theme color key, e.g. `blue`.
    pub color: String,
}

/// Insert shape for [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Free-form label attached to posts through [`PostTag`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    pub slug: String,
}

/// Insert shape for [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

/// Join row linking one post to one tag (many-to-many).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTag {
    pub id: EntityId,
    pub post_id: EntityId,
    pub tag_id: EntityId,
}

/// Insert shape for [`PostTag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostTag {
    pub post_id: EntityId,
    pub tag_id: EntityId,
}
