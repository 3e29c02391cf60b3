//! SQLite storage backend.
//!
//! # Responsibility
//! - Implement the full [`Storage`] contract over a migrated rusqlite
//!   connection with equivalent query semantics to the in-memory backend.
//!
//! # Invariants
//! - Uniqueness (slug, username, name, email) is enforced by the schema;
//!   violations surface as [`StoreError::Conflict`].
//! - Read paths reject undecodable persisted state instead of masking it.
//! - `rowid` assignment with `AUTOINCREMENT` keeps ids monotonic and
//!   never reused.

use crate::model::blog::{
    Category, NewCategory, NewPost, NewPostTag, NewTag, Post, PostTag, Tag,
};
use crate::model::inbox::{ContactMessage, NewContactMessage, NewSubscription, Subscription};
use crate::model::project::{NewProject, Project};
use crate::model::user::{NewUser, User};
use crate::model::EntityId;
use crate::store::{
    effective_latest_limit, now_epoch_millis, post_matches_query, Storage, StoreError,
    StoreResult,
};
use rusqlite::{params, Connection, ErrorCode, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    slug,
    excerpt,
    content,
    cover_image,
    published_at,
    featured,
    reading_time,
    category_id,
    author_id
FROM posts";

const POST_ORDER_SQL: &str = " ORDER BY published_at DESC, id ASC";

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    slug,
    description,
    cover_image,
    technologies,
    category_id,
    featured,
    url
FROM projects";

/// Relational [`Storage`] implementation over a migrated connection.
///
/// Construct with a connection from [`crate::db::open_db`] or
/// [`crate::db::open_db_in_memory`].
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_posts(&self, sql: &str, params: impl rusqlite::Params) -> StoreResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            posts.push(post_from_row(row)?);
        }
        Ok(posts)
    }
}

impl Storage for SqliteStorage<'_> {
    fn user(&self, id: EntityId) -> StoreResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, password FROM users WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(user_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, password FROM users WHERE username = ?1;")?;
        let mut rows = stmt.query([username])?;
        match rows.next()? {
            Some(row) => Ok(Some(user_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_user(&mut self, user: &NewUser) -> StoreResult<User> {
        self.conn
            .execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2);",
                params![user.username, user.password],
            )
            .map_err(|err| unique_violation(err, "user", "username"))?;
        Ok(User {
            id: self.conn.last_insert_rowid(),
            username: user.username.clone(),
            password: user.password.clone(),
        })
    }

    fn all_posts(&self) -> StoreResult<Vec<Post>> {
        self.query_posts(&format!("{POST_SELECT_SQL}{POST_ORDER_SQL};"), [])
    }

    fn post(&self, id: EntityId) -> StoreResult<Option<Post>> {
        let mut posts = self.query_posts(&format!("{POST_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(posts.pop())
    }

    fn post_by_slug(&self, slug: &str) -> StoreResult<Option<Post>> {
        let mut posts =
            self.query_posts(&format!("{POST_SELECT_SQL} WHERE slug = ?1;"), [slug])?;
        Ok(posts.pop())
    }

    fn create_post(&mut self, post: &NewPost) -> StoreResult<Post> {
        let featured = post.featured.unwrap_or(false);
        self.conn
            .execute(
                "INSERT INTO posts (
                    title,
                    slug,
                    excerpt,
                    content,
                    cover_image,
                    published_at,
                    featured,
                    reading_time,
                    category_id,
                    author_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    post.title,
                    post.slug,
                    post.excerpt,
                    post.content,
                    post.cover_image,
                    post.published_at,
                    featured as i64,
                    post.reading_time,
                    post.category_id,
                    post.author_id,
                ],
            )
            .map_err(|err| unique_violation(err, "post", "slug"))?;
        Ok(Post {
            id: self.conn.last_insert_rowid(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            cover_image: post.cover_image.clone(),
            published_at: post.published_at,
            featured,
            reading_time: post.reading_time,
            category_id: post.category_id,
            author_id: post.author_id,
        })
    }

    fn featured_posts(&self) -> StoreResult<Vec<Post>> {
        self.query_posts(
            &format!("{POST_SELECT_SQL} WHERE featured = 1{POST_ORDER_SQL};"),
            [],
        )
    }

    fn latest_posts(&self, limit: Option<u32>) -> StoreResult<Vec<Post>> {
        self.query_posts(
            &format!("{POST_SELECT_SQL}{POST_ORDER_SQL} LIMIT ?1;"),
            [effective_latest_limit(limit) as i64],
        )
    }

    fn posts_by_category(&self, category_id: EntityId) -> StoreResult<Vec<Post>> {
        self.query_posts(
            &format!("{POST_SELECT_SQL} WHERE category_id = ?1{POST_ORDER_SQL};"),
            [category_id],
        )
    }

    fn posts_by_tag(&self, tag_id: EntityId) -> StoreResult<Vec<Post>> {
        self.query_posts(
            &format!(
                "{POST_SELECT_SQL}
                 WHERE id IN (SELECT post_id FROM posts_tags WHERE tag_id = ?1)
                 {POST_ORDER_SQL};"
            ),
            [tag_id],
        )
    }

    fn search_posts(&self, query: &str) -> StoreResult<Vec<Post>> {
        // SQLite's lower() folds ASCII only; matching in Rust keeps case
        // folding Unicode-aware and identical to the in-memory backend.
        // `%`/`_` in user input stay literal.
        let needle = query.to_lowercase();
        let posts = self.query_posts(&format!("{POST_SELECT_SQL}{POST_ORDER_SQL};"), [])?;
        Ok(posts
            .into_iter()
            .filter(|post| post_matches_query(post, &needle))
            .collect())
    }

    fn all_categories(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, description, icon, color FROM categories ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(category_from_row(row)?);
        }
        Ok(categories)
    }

    fn category(&self, id: EntityId) -> StoreResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, description, icon, color FROM categories WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(category_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, description, icon, color FROM categories WHERE slug = ?1;",
        )?;
        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(category_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_category(&mut self, category: &NewCategory) -> StoreResult<Category> {
        self.conn
            .execute(
                "INSERT INTO categories (name, slug, description, icon, color)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    category.name,
                    category.slug,
                    category.description,
                    category.icon,
                    category.color,
                ],
            )
            .map_err(|err| unique_violation(err, "category", "name or slug"))?;
        Ok(Category {
            id: self.conn.last_insert_rowid(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
        })
    }

    fn all_tags(&self) -> StoreResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, slug FROM tags ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(tag_from_row(row)?);
        }
        Ok(tags)
    }

    fn tag(&self, id: EntityId) -> StoreResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, slug FROM tags WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(tag_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn tag_by_slug(&self, slug: &str) -> StoreResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, slug FROM tags WHERE slug = ?1;")?;
        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(tag_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_tag(&mut self, tag: &NewTag) -> StoreResult<Tag> {
        self.conn
            .execute(
                "INSERT INTO tags (name, slug) VALUES (?1, ?2);",
                params![tag.name, tag.slug],
            )
            .map_err(|err| unique_violation(err, "tag", "name or slug"))?;
        Ok(Tag {
            id: self.conn.last_insert_rowid(),
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        })
    }

    fn create_post_tag(&mut self, link: &NewPostTag) -> StoreResult<PostTag> {
        self.conn.execute(
            "INSERT INTO posts_tags (post_id, tag_id) VALUES (?1, ?2);",
            params![link.post_id, link.tag_id],
        )?;
        Ok(PostTag {
            id: self.conn.last_insert_rowid(),
            post_id: link.post_id,
            tag_id: link.tag_id,
        })
    }

    fn tags_by_post(&self, post_id: EntityId) -> StoreResult<Vec<Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.id, t.name, t.slug
             FROM tags t
             INNER JOIN posts_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = ?1
             ORDER BY t.id ASC;",
        )?;
        let mut rows = stmt.query([post_id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(tag_from_row(row)?);
        }
        Ok(tags)
    }

    fn all_projects(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(project_from_row(row)?);
        }
        Ok(projects)
    }

    fn project(&self, id: EntityId) -> StoreResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(project_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn project_by_slug(&self, slug: &str) -> StoreResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE slug = ?1;"))?;
        let mut rows = stmt.query([slug])?;
        match rows.next()? {
            Some(row) => Ok(Some(project_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn create_project(&mut self, project: &NewProject) -> StoreResult<Project> {
        let featured = project.featured.unwrap_or(false);
        let technologies_json = serde_json::to_string(&project.technologies)
            .map_err(|err| StoreError::InvalidData(format!("technologies encode: {err}")))?;
        self.conn
            .execute(
                "INSERT INTO projects (
                    title,
                    slug,
                    description,
                    cover_image,
                    technologies,
                    category_id,
                    featured,
                    url
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    project.title,
                    project.slug,
                    project.description,
                    project.cover_image,
                    technologies_json,
                    project.category_id,
                    featured as i64,
                    project.url,
                ],
            )
            .map_err(|err| unique_violation(err, "project", "slug"))?;
        Ok(Project {
            id: self.conn.last_insert_rowid(),
            title: project.title.clone(),
            slug: project.slug.clone(),
            description: project.description.clone(),
            cover_image: project.cover_image.clone(),
            technologies: project.technologies.clone(),
            category_id: project.category_id,
            featured,
            url: project.url.clone(),
        })
    }

    fn featured_projects(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE featured = 1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(project_from_row(row)?);
        }
        Ok(projects)
    }

    fn create_contact_message(
        &mut self,
        message: &NewContactMessage,
    ) -> StoreResult<ContactMessage> {
        let created_at = now_epoch_millis();
        self.conn.execute(
            "INSERT INTO contact_messages (name, email, subject, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                message.name,
                message.email,
                message.subject,
                message.message,
                created_at,
            ],
        )?;
        Ok(ContactMessage {
            id: self.conn.last_insert_rowid(),
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            created_at,
        })
    }

    fn create_subscription(
        &mut self,
        subscription: &NewSubscription,
    ) -> StoreResult<Subscription> {
        let created_at = now_epoch_millis();
        self.conn
            .execute(
                "INSERT INTO subscriptions (email, created_at) VALUES (?1, ?2);",
                params![subscription.email, created_at],
            )
            .map_err(|err| unique_violation(err, "subscription", "email"))?;
        Ok(Subscription {
            id: self.conn.last_insert_rowid(),
            email: subscription.email.clone(),
            created_at,
        })
    }

    fn subscription_by_email(&self, email: &str) -> StoreResult<Option<Subscription>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, email, created_at FROM subscriptions WHERE email = ?1;")?;
        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Subscription {
                id: row.get("id")?,
                email: row.get("email")?,
                created_at: row.get("created_at")?,
            }));
        }
        Ok(None)
    }
}

fn unique_violation(
    err: rusqlite::Error,
    entity: &'static str,
    field: &'static str,
) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StoreError::Conflict { entity, field }
        }
        _ => err.into(),
    }
}

fn user_from_row(row: &Row<'_>) -> StoreResult<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
    })
}

fn category_from_row(row: &Row<'_>) -> StoreResult<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        icon: row.get("icon")?,
        color: row.get("color")?,
    })
}

fn tag_from_row(row: &Row<'_>) -> StoreResult<Tag> {
    Ok(Tag {
        id: row.get("id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
    })
}

fn post_from_row(row: &Row<'_>) -> StoreResult<Post> {
    Ok(Post {
        id: row.get("id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        excerpt: row.get("excerpt")?,
        content: row.get("content")?,
        cover_image: row.get("cover_image")?,
        published_at: row.get("published_at")?,
        featured: flag_from_db(row.get("featured")?, "posts.featured")?,
        reading_time: row.get("reading_time")?,
        category_id: row.get("category_id")?,
        author_id: row.get("author_id")?,
    })
}

fn project_from_row(row: &Row<'_>) -> StoreResult<Project> {
    let technologies_json: String = row.get("technologies")?;
    let technologies = serde_json::from_str(&technologies_json).map_err(|err| {
        StoreError::InvalidData(format!(
            "invalid JSON in projects.technologies: {err}"
        ))
    })?;
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        cover_image: row.get("cover_image")?,
        technologies,
        category_id: row.get("category_id")?,
        featured: flag_from_db(row.get("featured")?, "projects.featured")?,
        url: row.get("url")?,
    })
}

fn flag_from_db(value: i64, column: &'static str) -> StoreResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StoreError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}
