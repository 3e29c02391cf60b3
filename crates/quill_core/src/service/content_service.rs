//! Read-side content use-cases.
//!
//! # Responsibility
//! - Assemble the post detail view (post + category + tags).
//! - Resolve category/tag slugs before FK-filtered listings.
//! - Guard search against blank queries.
//!
//! # Invariants
//! - Unknown slugs surface as `Ok(None)`, matching the store contract.

use crate::model::blog::{Category, Post, Tag};
use crate::service::ServiceError;
use crate::store::Storage;
use serde::Serialize;

/// Post detail view: the post with its category and tags embedded, the
/// shape served for a single-article page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    /// `None` when the post references a category that does not exist;
    /// referential integrity is not guaranteed by every backend.
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// Read-side facade over any [`Storage`] backend.
pub struct ContentService<S: Storage> {
    store: S,
}

impl<S: Storage> ContentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Looks up a post by slug and embeds its category and tags.
    pub fn post_detail(&self, slug: &str) -> Result<Option<PostDetail>, ServiceError> {
        let Some(post) = self.store.post_by_slug(slug)? else {
            return Ok(None);
        };

        let category = self.store.category(post.category_id)?;
        let tags = self.store.tags_by_post(post.id)?;
        Ok(Some(PostDetail {
            post,
            category,
            tags,
        }))
    }

    /// Lists posts for a category addressed by slug.
    ///
    /// Returns `Ok(None)` when the category slug is unknown, so callers can
    /// distinguish "no such category" from "category with no posts".
    pub fn posts_for_category(&self, slug: &str) -> Result<Option<Vec<Post>>, ServiceError> {
        let Some(category) = self.store.category_by_slug(slug)? else {
            return Ok(None);
        };
        Ok(Some(self.store.posts_by_category(category.id)?))
    }

    /// Lists posts for a tag addressed by slug.
    pub fn posts_for_tag(&self, slug: &str) -> Result<Option<Vec<Post>>, ServiceError> {
        let Some(tag) = self.store.tag_by_slug(slug)? else {
            return Ok(None);
        };
        Ok(Some(self.store.posts_by_tag(tag.id)?))
    }

    /// Case-insensitive substring search; blank queries are rejected.
    pub fn search(&self, query: &str) -> Result<Vec<Post>, ServiceError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        Ok(self.store.search_posts(trimmed)?)
    }
}
