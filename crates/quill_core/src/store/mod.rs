//! Storage contract and backend implementations.
//!
//! # Responsibility
//! - Define one storage-medium-agnostic contract for reading and creating
//!   the seven content entity kinds.
//! - Isolate map/SQL details inside the backend modules.
//!
//! # Invariants
//! - Absence is `Ok(None)`, never an error.
//! - Every multi-post read is sorted by `published_at DESC, id ASC`.
//! - Ids assigned by a backend are strictly increasing per entity kind and
//!   never reused.

use crate::db::DbError;
use crate::model::blog::{
    Category, NewCategory, NewPost, NewPostTag, NewTag, Post, PostTag, Tag,
};
use crate::model::inbox::{ContactMessage, NewContactMessage, NewSubscription, Subscription};
use crate::model::project::{NewProject, Project};
use crate::model::user::{NewUser, User};
use crate::model::{EntityId, EpochMillis};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod memory;
pub mod sqlite;

pub use memory::MemStorage;
pub use sqlite::SqliteStorage;

/// Applied when the caller does not pass a limit to [`Storage::latest_posts`].
pub const DEFAULT_LATEST_LIMIT: u32 = 10;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure surfaced by the storage contract.
#[derive(Debug)]
pub enum StoreError {
    /// Transport-level database failure.
    Db(DbError),
    /// A schema uniqueness constraint rejected the write.
    Conflict {
        entity: &'static str,
        field: &'static str,
    },
    /// Persisted state could not be decoded into a domain record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict { entity, field } => {
                write!(f, "duplicate {entity} {field}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Conflict { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage-medium-agnostic contract for the content site.
///
/// Reads take `&self`; creates take `&mut self`. The contract has no update
/// or delete operations: entities are created once and read many times.
pub trait Storage {
    // User operations
    fn user(&self, id: EntityId) -> StoreResult<Option<User>>;
    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    fn create_user(&mut self, user: &NewUser) -> StoreResult<User>;

    // Post operations
    fn all_posts(&self) -> StoreResult<Vec<Post>>;
    fn post(&self, id: EntityId) -> StoreResult<Option<Post>>;
    fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>>;
    fn create_post(&mut self, post: &NewPost) -> StoreResult<Post>;
    fn featured_posts(&self) -> StoreResult<Vec<Post>>;
    /// Newest posts first, truncated to `limit` (default
    /// [`DEFAULT_LATEST_LIMIT`]).
    fn latest_posts(&self, limit: Option<u32>) -> StoreResult<Vec<Post>>;
    fn posts_by_category(&self, category_id: EntityId) -> StoreResult<Vec<Post>>;
    fn posts_by_tag(&self, tag_id: EntityId) -> StoreResult<Vec<Post>>;
    /// Case-insensitive substring match against title, excerpt or content.
    /// Case folding is Unicode-aware in every backend. A blank query
    /// matches every post; services guard against blank input upstream.
    fn search_posts(&self, query: &str) -> StoreResult<Vec<Post>>;

    // Category operations
    fn all_categories(&self) -> StoreResult<Vec<Category>>;
    fn category(&self, id: EntityId) -> StoreResult<Option<Category>>;
    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    fn create_category(&mut self, category: &NewCategory) -> StoreResult<Category>;

    // Tag operations
    fn all_tags(&self) -> StoreResult<Vec<Tag>>;
    fn tag(&self, id: EntityId) -> StoreResult<Option<Tag>>;
    fn tag_by_slug(&self, slug: &str) -> StoreResult<Option<Tag>>;
    fn create_tag(&mut self, tag: &NewTag) -> StoreResult<Tag>;

    // Post/tag relation operations
    fn create_post_tag(&mut self, link: &NewPostTag) -> StoreResult<PostTag>;
    /// All tags joined to `post_id` through post/tag link rows.
    fn tags_by_post(&self, post_id: EntityId) -> StoreResult<Vec<Tag>>;

    // Project operations
    fn all_projects(&self) -> StoreResult<Vec<Project>>;
    fn project(&self, id: EntityId) -> StoreResult<Option<Project>>;
    fn project_by_slug(&self, slug: &str) -> StoreResult<Option<Project>>;
    fn create_project(&mut self, project: &NewProject) -> StoreResult<Project>;
    fn featured_projects(&self) -> StoreResult<Vec<Project>>;

    // Inbox operations
    /// Stamps `created_at` with the store clock.
    fn create_contact_message(&mut self, message: &NewContactMessage)
        -> StoreResult<ContactMessage>;
    /// Stamps `created_at` with the store clock. Email uniqueness is the
    /// caller's pre-check in the in-memory backend and a schema constraint
    /// in SQLite.
    fn create_subscription(&mut self, subscription: &NewSubscription)
        -> StoreResult<Subscription>;
    fn subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>>;
}

/// Forwarding impl so callers can hand one store to several services by
/// mutable borrow instead of moving it.
impl<S: Storage + ?Sized> Storage for &mut S {
    fn user(&self, id: EntityId) -> StoreResult<Option<User>> {
        (**self).user(id)
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        (**self).user_by_username(username)
    }

    fn create_user(&mut self, user: &NewUser) -> StoreResult<User> {
        (**self).create_user(user)
    }

    fn all_posts(&self) -> StoreResult<Vec<Post>> {
        (**self).all_posts()
    }

    fn post(&self, id: EntityId) -> StoreResult<Option<Post>> {
        (**self).post(id)
    }

    fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        (**self).post_by_slug(slug)
    }

    fn create_post(&mut self, post: &NewPost) -> StoreResult<Post> {
        (**self).create_post(post)
    }

    fn featured_posts(&self) -> StoreResult<Vec<Post>> {
        (**self).featured_posts()
    }

    fn latest_posts(&self, limit: Option<u32>) -> StoreResult<Vec<Post>> {
        (**self).latest_posts(limit)
    }

    fn posts_by_category(&self, category_id: EntityId) -> StoreResult<Vec<Post>> {
        (**self).posts_by_category(category_id)
    }

    fn posts_by_tag(&self, tag_id: EntityId) -> StoreResult<Vec<Post>> {
        (**self).posts_by_tag(tag_id)
    }

    fn search_posts(&self, query: &str) -> StoreResult<Vec<Post>> {
        (**self).search_posts(query)
    }

    fn all_categories(&self) -> StoreResult<Vec<Category>> {
        (**self).all_categories()
    }

    fn category(&self, id: EntityId) -> StoreResult<Option<Category>> {
        (**self).category(id)
    }

    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        (**self).category_by_slug(slug)
    }

    fn create_category(&mut self, category: &NewCategory) -> StoreResult<Category> {
        (**self).create_category(category)
    }

    fn all_tags(&self) -> StoreResult<Vec<Tag>> {
        (**self).all_tags()
    }

    fn tag(&self, id: EntityId) -> StoreResult<Option<Tag>> {
        (**self).tag(id)
    }

    fn tag_by_slug(&self, slug: &str) -> StoreResult<Option<Tag>> {
        (**self).tag_by_slug(slug)
    }

    fn create_tag(&mut self, tag: &NewTag) -> StoreResult<Tag> {
        (**self).create_tag(tag)
    }

    fn create_post_tag(&mut self, link: &NewPostTag) -> StoreResult<PostTag> {
        (**self).create_post_tag(link)
    }

    fn tags_by_post(&self, post_id: EntityId) -> StoreResult<Vec<Tag>> {
        (**self).tags_by_post(post_id)
    }

    fn all_projects(&self) -> StoreResult<Vec<Project>> {
        (**self).all_projects()
    }

    fn project(&self, id: EntityId) -> StoreResult<Option<Project>> {
        (**self).project(id)
    }

    fn project_by_slug(&self, slug: &str) -> StoreResult<Option<Project>> {
        (**self).project_by_slug(slug)
    }

    fn create_project(&mut self, project: &NewProject) -> StoreResult<Project> {
        (**self).create_project(project)
    }

    fn featured_projects(&self) -> StoreResult<Vec<Project>> {
        (**self).featured_projects()
    }

    fn create_contact_message(
        &mut self,
        message: &NewContactMessage,
    ) -> StoreResult<ContactMessage> {
        (**self).create_contact_message(message)
    }

    fn create_subscription(
        &mut self,
        subscription: &NewSubscription,
    ) -> StoreResult<Subscription> {
        (**self).create_subscription(subscription)
    }

    fn subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>> {
        (**self).subscription_by_email(email)
    }
}

/// Effective limit for latest-post listings.
pub(crate) fn effective_latest_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LATEST_LIMIT) as usize
}

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_millis() -> EpochMillis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as EpochMillis)
        .unwrap_or(0)
}

/// Substring match against the searchable post fields. `needle` must
/// already be lowercased; folding uses Rust's Unicode rules so both
/// backends match the same rows for non-ASCII text.
pub(crate) fn post_matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.excerpt.to_lowercase().contains(needle)
        || post.content.to_lowercase().contains(needle)
}

/// Orders posts newest first with a deterministic id tie-break.
pub(crate) fn sort_posts_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
