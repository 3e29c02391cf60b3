//! Demo content seeding.
//!
//! # Responsibility
//! - Populate a fresh store with a coherent demo data set: one author,
//!   categories, tags, cross-linked posts and portfolio projects.
//!
//! # Invariants
//! - Seeding is synchronous and runs to completion before the store is
//!   handed to any caller; nothing here is deferred or timer-driven.
//! - Foreign keys are wired from the ids the store returns, never assumed.

use crate::model::blog::{NewCategory, NewPost, NewPostTag, NewTag};
use crate::model::project::NewProject;
use crate::model::user::NewUser;
use crate::model::{EntityId, EpochMillis};
use crate::store::{Storage, StoreError, StoreResult};
use log::info;
use std::collections::HashMap;

// Publication timestamps, epoch milliseconds UTC.
const NOV_15_2022: EpochMillis = 1_668_470_400_000;
const JAN_01_2023: EpochMillis = 1_672_531_200_000;
const JUN_01_2023: EpochMillis = 1_685_577_600_000;
const MAR_10_2024: EpochMillis = 1_710_028_800_000;

/// Entity counts created by [`seed_demo_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub tags: usize,
    pub posts: usize,
    pub projects: usize,
}

/// Seeds demo content into an empty store and returns what was created.
///
/// Idempotency is not attempted; run this once against a fresh store.
pub fn seed_demo_content<S: Storage>(store: &mut S) -> StoreResult<SeedSummary> {
    let admin = store.create_user(&NewUser {
        username: "admin".to_string(),
        // Opaque to the store; no auth logic consumes it.
        password: "password123".to_string(),
    })?;

    let category_ids = seed_categories(store)?;
    let tag_ids = seed_tags(store)?;
    let posts = seed_posts(store, admin.id, &category_ids, &tag_ids)?;
    let projects = seed_projects(store, &category_ids)?;

    let summary = SeedSummary {
        categories: category_ids.len(),
        tags: tag_ids.len(),
        posts,
        projects,
    };
    info!(
        "event=seed_complete module=seed status=ok categories={} tags={} posts={} projects={}",
        summary.categories, summary.tags, summary.posts, summary.projects
    );
    Ok(summary)
}

type SlugIds = HashMap<&'static str, EntityId>;

fn seed_categories<S: Storage>(store: &mut S) -> StoreResult<SlugIds> {
    let categories = [
        new_category(
            "Data Engineering",
            "data-engineering",
            "Data pipelines, ETL processes, and data architecture best practices.",
            "database",
            "blue",
        ),
        new_category(
            "Machine Learning",
            "machine-learning",
            "ML algorithms, model training, and practical applications of AI.",
            "brain",
            "purple",
        ),
        new_category(
            "Data Visualization",
            "data-visualization",
            "Creating effective dashboards and visualization techniques.",
            "chart-line",
            "green",
        ),
        new_category(
            "Cloud Solutions",
            "cloud-solutions",
            "Cloud-based data platforms, serverless architectures, and more.",
            "cloud",
            "red",
        ),
    ];

    let mut ids = HashMap::new();
    for (key, category) in categories {
        let created = store.create_category(&category)?;
        ids.insert(key, created.id);
    }
    Ok(ids)
}

fn new_category(
    name: &str,
    slug: &'static str,
    description: &str,
    icon: &str,
    color: &str,
) -> (&'static str, NewCategory) {
    (
        slug,
        NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        },
    )
}

fn seed_tags<S: Storage>(store: &mut S) -> StoreResult<SlugIds> {
    let tags: [(&'static str, &str); 8] = [
        ("etl", "ETL"),
        ("pytorch", "PyTorch"),
        ("tableau", "Tableau"),
        ("big-data", "BigData"),
        ("deep-learning", "Deep Learning"),
        ("d3js", "D3.js"),
        ("aws", "AWS"),
        ("nlp", "NLP"),
    ];

    let mut ids = HashMap::new();
    for (slug, name) in tags {
        let created = store.create_tag(&NewTag {
            name: name.to_string(),
            slug: slug.to_string(),
        })?;
        ids.insert(slug, created.id);
    }
    Ok(ids)
}

fn seed_posts<S: Storage>(
    store: &mut S,
    author_id: EntityId,
    category_ids: &SlugIds,
    tag_ids: &SlugIds,
) -> StoreResult<usize> {
    let posts: [(NewPost, &[&str]); 4] = [
        (
            NewPost {
                title: "Building Resilient Data Pipelines with Apache Airflow".to_string(),
                slug: "building-resilient-data-pipelines-apache-airflow".to_string(),
                excerpt: "Designing fault-tolerant pipelines that survive upstream failures \
                          without manual intervention."
                    .to_string(),
                content: "# Building Resilient Data Pipelines\n\nResilient pipelines do not \
                          just work when everything is healthy; they recover gracefully when \
                          sources fail. Airflow's retry policies, SLAs and sensor timeouts \
                          are the primitives that make this practical.\n"
                    .to_string(),
                cover_image: "/images/posts/airflow-pipelines.jpg".to_string(),
                published_at: JUN_01_2023,
                featured: Some(true),
                reading_time: 8,
                category_id: required_id(category_ids, "data-engineering")?,
                author_id,
            },
            &["etl", "big-data"],
        ),
        (
            NewPost {
                title: "Practical Deep Learning with PyTorch".to_string(),
                slug: "practical-deep-learning-pytorch".to_string(),
                excerpt: "From tensors to a trained model: a pragmatic tour of the PyTorch \
                          training loop."
                    .to_string(),
                content: "# Practical Deep Learning\n\nThe training loop is where most \
                          projects live or die. This walkthrough covers datasets, \
                          dataloaders, schedulers and the checkpointing habits that save \
                          you at 2am.\n"
                    .to_string(),
                cover_image: "/images/posts/pytorch-deep-learning.jpg".to_string(),
                published_at: JAN_01_2023,
                featured: Some(true),
                reading_time: 11,
                category_id: required_id(category_ids, "machine-learning")?,
                author_id,
            },
            &["pytorch", "deep-learning"],
        ),
        (
            NewPost {
                title: "Dashboard Design Principles with D3.js".to_string(),
                slug: "dashboard-design-principles-d3js".to_string(),
                excerpt: "Why most dashboards fail, and the layout and color rules that \
                          keep yours readable."
                    .to_string(),
                content: "# Dashboard Design Principles\n\nA dashboard is an argument, not \
                          a data dump. Start from the question, pick one chart per answer, \
                          and let D3 handle the rest.\n"
                    .to_string(),
                cover_image: "/images/posts/d3-dashboards.jpg".to_string(),
                published_at: NOV_15_2022,
                featured: None,
                reading_time: 6,
                category_id: required_id(category_ids, "data-visualization")?,
                author_id,
            },
            &["d3js", "tableau"],
        ),
        (
            NewPost {
                title: "Serverless ETL on AWS".to_string(),
                slug: "serverless-etl-aws".to_string(),
                excerpt: "Replacing an always-on Spark cluster with Lambda, Glue and Step \
                          Functions."
                    .to_string(),
                content: "# Serverless ETL on AWS\n\nFor bursty workloads, a serverless \
                          topology cuts cost and operational surface. This post walks \
                          through the event wiring and its failure modes.\n"
                    .to_string(),
                cover_image: "/images/posts/serverless-etl.jpg".to_string(),
                published_at: MAR_10_2024,
                featured: None,
                reading_time: 9,
                category_id: required_id(category_ids, "cloud-solutions")?,
                author_id,
            },
            &["aws", "etl"],
        ),
    ];

    let mut count = 0;
    for (post, tag_slugs) in posts {
        let created = store.create_post(&post)?;
        for &slug in tag_slugs {
            store.create_post_tag(&NewPostTag {
                post_id: created.id,
                tag_id: required_id(tag_ids, slug)?,
            })?;
        }
        count += 1;
    }
    Ok(count)
}

fn seed_projects<S: Storage>(store: &mut S, category_ids: &SlugIds) -> StoreResult<usize> {
    let projects = [
        NewProject {
            title: "Realtime Analytics Pipeline".to_string(),
            slug: "realtime-analytics-pipeline".to_string(),
            description: "Streaming clickstream analytics from ingestion to dashboard."
                .to_string(),
            cover_image: "/images/projects/realtime-analytics.jpg".to_string(),
            technologies: vec![
                "Kafka".to_string(),
                "Flink".to_string(),
                "ClickHouse".to_string(),
            ],
            category_id: required_id(category_ids, "data-engineering")?,
            featured: Some(true),
            url: Some("https://github.com/example/realtime-analytics".to_string()),
        },
        NewProject {
            title: "Sentiment Dashboard".to_string(),
            slug: "sentiment-dashboard".to_string(),
            description: "Live sentiment visualization for product reviews.".to_string(),
            cover_image: "/images/projects/sentiment-dashboard.jpg".to_string(),
            technologies: vec!["Python".to_string(), "D3.js".to_string()],
            category_id: required_id(category_ids, "data-visualization")?,
            featured: Some(true),
            url: None,
        },
        NewProject {
            title: "Churn Prediction Model".to_string(),
            slug: "churn-prediction-model".to_string(),
            description: "Gradient-boosted churn scoring served behind a small API."
                .to_string(),
            cover_image: "/images/projects/churn-prediction.jpg".to_string(),
            technologies: vec!["PyTorch".to_string(), "FastAPI".to_string()],
            category_id: required_id(category_ids, "machine-learning")?,
            featured: None,
            url: Some("https://github.com/example/churn-prediction".to_string()),
        },
    ];

    let mut count = 0;
    for project in projects {
        store.create_project(&project)?;
        count += 1;
    }
    Ok(count)
}

fn required_id(ids: &SlugIds, slug: &str) -> StoreResult<EntityId> {
    ids.get(slug).copied().ok_or_else(|| {
        StoreError::InvalidData(format!("seed slug `{slug}` missing from created ids"))
    })
}
