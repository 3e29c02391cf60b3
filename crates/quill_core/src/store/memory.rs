//! In-memory storage backend.
//!
//! # Responsibility
//! - Implement the full [`Storage`] contract over process-local ordered
//!   maps, one per entity kind, with per-kind id counters starting at 1.
//!
//! # Invariants
//! - Counters only move forward; an id handed out once is never reassigned.
//! - Defaults (`featured=false`, `url=None`) are merged at create time.
//! - Subscription email uniqueness is intentionally NOT enforced here; the
//!   caller's check-then-insert is the documented behavior and the SQLite
//!   backend's schema constraint is the atomic variant.

use crate::model::blog::{
    Category, NewCategory, NewPost, NewPostTag, NewTag, Post, PostTag, Tag,
};
use crate::model::inbox::{ContactMessage, NewContactMessage, NewSubscription, Subscription};
use crate::model::project::{NewProject, Project};
use crate::model::user::{NewUser, User};
use crate::model::EntityId;
use crate::store::{
    effective_latest_limit, now_epoch_millis, post_matches_query, sort_posts_newest_first,
    Storage, StoreResult,
};
use std::collections::{BTreeMap, BTreeSet};

/// One entity table: ordered rows plus the next surrogate id.
#[derive(Debug, Clone)]
struct Table<T> {
    rows: BTreeMap<EntityId, T>,
    next_id: EntityId,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Assigns the next id, stores the built row and returns it.
    fn insert_with(&mut self, build: impl FnOnce(EntityId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: EntityId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

/// Map-backed [`Storage`] implementation with process-lifetime state.
///
/// Construct one explicitly and pass it to callers; never hold it as an
/// ambient global, so tests can use fresh isolated instances.
#[derive(Debug, Clone)]
pub struct MemStorage {
    users: Table<User>,
    posts: Table<Post>,
    categories: Table<Category>,
    tags: Table<Tag>,
    post_tags: Table<PostTag>,
    projects: Table<Project>,
    contact_messages: Table<ContactMessage>,
    subscriptions: Table<Subscription>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            posts: Table::new(),
            categories: Table::new(),
            tags: Table::new(),
            post_tags: Table::new(),
            projects: Table::new(),
            contact_messages: Table::new(),
            subscriptions: Table::new(),
        }
    }

    fn collect_posts(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|post| keep(post)).cloned().collect();
        sort_posts_newest_first(&mut posts);
        posts
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemStorage {
    fn user(&self, id: EntityId) -> StoreResult<Option<User>> {
        Ok(self.users.get(id))
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&mut self, user: &NewUser) -> StoreResult<User> {
        Ok(self.users.insert_with(|id| User {
            id,
            username: user.username.clone(),
            password: user.password.clone(),
        }))
    }

    fn all_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.collect_posts(|_| true))
    }

    fn post(&self, id: EntityId) -> StoreResult<Option<Post>> {
        Ok(self.posts.get(id))
    }

    fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        Ok(self.posts.values().find(|post| post.slug == slug).cloned())
    }

    fn create_post(&mut self, post: &NewPost) -> StoreResult<Post> {
        Ok(self.posts.insert_with(|id| Post {
            id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            published_at: post.published_at,
            featured: post.featured.unwrap_or(false),
            reading_time: post.reading_time,
            category_id: post.category_id,
            author_id: post.author_id,
        }))
    }

    fn featured_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self.collect_posts(|post| post.featured))
    }

    fn latest_posts(&self, limit: Option<u32>) -> StoreResult<Vec<Post>> {
        let mut posts = self.collect_posts(|_| true);
        posts.truncate(effective_latest_limit(limit));
        Ok(posts)
    }

    fn posts_by_category(&self, category_id: EntityId) -> StoreResult<Vec<Post>> {
        Ok(self.collect_posts(|post| post.category_id == category_id))
    }

    fn posts_by_tag(&self, tag_id: EntityId) -> StoreResult<Vec<Post>> {
        let linked: BTreeSet<EntityId> = self
            .post_tags
            .values()
            .filter(|link| link.tag_id == tag_id)
            .map(|link| link.post_id)
            .collect();
        Ok(self.collect_posts(|post| linked.contains(&post.id)))
    }

    fn search_posts(&self, query: &str) -> StoreResult<Vec<Post>> {
        let needle = query.to_lowercase();
        Ok(self.collect_posts(|post| post_matches_query(post, &needle)))
    }

    fn all_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.values().cloned().collect())
    }

    fn category(&self, id: EntityId) -> StoreResult<Option<Category>> {
        Ok(self.categories.get(id))
    }

    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(self
            .categories
            .values()
            .find(|category| category.slug == slug)
            .cloned())
    }

    fn create_category(&mut self, category: &NewCategory) -> StoreResult<Category> {
        Ok(self.categories.insert_with(|id| Category {
            id,
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
        }))
    }

    fn all_tags(&self) -> StoreResult<Vec<Tag>> {
        Ok(self.tags.values().cloned().collect())
    }

    fn tag(&self, id: EntityId) -> StoreResult<Option<Tag>> {
        Ok(self.tags.get(id))
    }

    fn tag_by_slug(&self, slug: &str) -> StoreResult<Option<Tag>> {
        Ok(self.tags.values().find(|tag| tag.slug == slug).cloned())
    }

    fn create_tag(&mut self, tag: &NewTag) -> StoreResult<Tag> {
        Ok(self.tags.insert_with(|id| Tag {
            id,
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        }))
    }

    fn create_post_tag(&mut self, link: &NewPostTag) -> StoreResult<PostTag> {
        Ok(self.post_tags.insert_with(|id| PostTag {
            id,
            post_id: link.post_id,
            tag_id: link.tag_id,
        }))
    }

    fn tags_by_post(&self, post_id: EntityId) -> StoreResult<Vec<Tag>> {
        let linked: BTreeSet<EntityId> = self
            .post_tags
            .values()
            .filter(|link| link.post_id == post_id)
            .map(|link| link.tag_id)
            .collect();
        Ok(self
            .tags
            .values()
            .filter(|tag| linked.contains(&tag.id))
            .cloned()
            .collect())
    }

    fn all_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.projects.values().cloned().collect())
    }

    fn project(&self, id: EntityId) -> StoreResult<Option<Project>> {
        Ok(self.projects.get(id))
    }

    fn project_by_slug(&self, slug: &str) -> StoreResult<Option<Project>> {
        Ok(self
            .projects
            .values()
            .find(|project| project.slug == slug)
            .cloned())
    }

    fn create_project(&mut self, project: &NewProject) -> StoreResult<Project> {
        Ok(self.projects.insert_with(|id| Project {
            id,
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            cover_image: project.cover_image.clone(),
            technologies: project.technologies.clone(),
            category_id: project.category_id,
            featured: project.featured.unwrap_or(false),
            url: project.url.clone(),
        }))
    }

    fn featured_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self
            .projects
            .values()
            .filter(|project| project.featured)
            .cloned()
            .collect())
    }

    fn create_contact_message(
        &mut self,
        message: &NewContactMessage,
    ) -> StoreResult<ContactMessage> {
        let created_at = now_epoch_millis();
        Ok(self.contact_messages.insert_with(|id| ContactMessage {
            id,
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            created_at,
        }))
    }

    fn create_subscription(
        &mut self,
        subscription: &NewSubscription,
    ) -> StoreResult<Subscription> {
        let created_at = now_epoch_millis();
        Ok(self.subscriptions.insert_with(|id| Subscription {
            id,
            email: subscription.email.clone(),
            created_at,
        }))
    }

    fn subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>> {
        Ok(self
            .subscriptions
            .values()
            .find(|subscription| subscription.email == email)
            .cloned())
    }
}
