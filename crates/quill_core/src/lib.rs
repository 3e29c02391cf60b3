//! Content storage core for a personal blog/portfolio site.
//! This crate is the single source of truth for the storage contract and
//! its interchangeable backends.

pub mod db;
pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::blog::{
    Category, NewCategory, NewPost, NewPostTag, NewTag, Post, PostTag, Tag,
};
pub use model::inbox::{
    ContactMessage, NewContactMessage, NewSubscription, Subscription, ValidationError,
};
pub use model::project::{NewProject, Project};
pub use model::user::{NewUser, User};
pub use model::{EntityId, EpochMillis};
pub use seed::{seed_demo_content, SeedSummary};
pub use service::content_service::{ContentService, PostDetail};
pub use service::inbox_service::InboxService;
pub use service::ServiceError;
pub use store::{MemStorage, SqliteStorage, Storage, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
