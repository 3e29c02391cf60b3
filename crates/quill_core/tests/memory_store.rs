use quill_core::{
    MemStorage, NewCategory, NewPost, NewPostTag, NewProject, NewSubscription, NewTag, NewUser,
    Storage,
};

// Epoch milliseconds UTC.
const JAN_01_2023: i64 = 1_672_531_200_000;
const JUN_01_2023: i64 = 1_685_577_600_000;
const DEC_31_2023: i64 = 1_703_980_800_000;

fn new_post(slug: &str, published_at: i64, featured: Option<bool>) -> NewPost {
    NewPost {
        title: format!("Post {slug}"),
        slug: slug.to_string(),
        excerpt: format!("Excerpt for {slug}"),
        content: format!("Body for {slug}"),
        cover_image: format!("/images/{slug}.jpg"),
        published_at,
        featured,
        reading_time: 5,
        category_id: 1,
        author_id: 1,
    }
}

#[test]
fn created_ids_are_monotonic_per_entity_kind() {
    let mut store = MemStorage::new();

    let first = store.create_post(&new_post("a", JAN_01_2023, None)).unwrap();
    let second = store.create_post(&new_post("b", JAN_01_2023, None)).unwrap();
    let third = store.create_post(&new_post("c", JAN_01_2023, None)).unwrap();
    assert_eq!((first.id, second.id, third.id), (1, 2, 3));

    // Counters are independent per entity kind.
    let tag = store
        .create_tag(&NewTag {
            name: "Rust".to_string(),
            slug: "rust".to_string(),
        })
        .unwrap();
    assert_eq!(tag.id, 1);
}

#[test]
fn lookup_by_id_and_slug_roundtrip() {
    let mut store = MemStorage::new();
    let created = store.create_post(&new_post("hello", JAN_01_2023, None)).unwrap();

    let by_id = store.post(created.id).unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_slug = store.post_by_slug("hello").unwrap().unwrap();
    assert_eq!(by_slug, created);

    assert!(store.post(999).unwrap().is_none());
    assert!(store.post_by_slug("missing").unwrap().is_none());
}

#[test]
fn all_posts_sorts_newest_first_across_years() {
    let mut store = MemStorage::new();
    store.create_post(&new_post("mid", JUN_01_2023, None)).unwrap();
    store.create_post(&new_post("old", JAN_01_2023, None)).unwrap();
    store.create_post(&new_post("new", DEC_31_2023, None)).unwrap();

    let slugs: Vec<String> = store
        .all_posts()
        .unwrap()
        .into_iter()
        .map(|post| post.slug)
        .collect();
    assert_eq!(slugs, vec!["new", "mid", "old"]);
}

#[test]
fn latest_posts_truncates_and_defaults_to_ten() {
    let mut store = MemStorage::new();
    for idx in 0..12 {
        store
            .create_post(&new_post(&format!("post-{idx}"), JAN_01_2023 + idx, None))
            .unwrap();
    }

    let defaulted = store.latest_posts(None).unwrap();
    assert_eq!(defaulted.len(), 10);

    let limited = store.latest_posts(Some(3)).unwrap();
    assert_eq!(limited.len(), 3);
    assert_eq!(limited[0].slug, "post-11");

    assert!(store.latest_posts(Some(0)).unwrap().is_empty());
}

#[test]
fn featured_posts_excludes_unfeatured_and_defaults() {
    let mut store = MemStorage::new();
    store.create_post(&new_post("plain", JUN_01_2023, None)).unwrap();
    store
        .create_post(&new_post("explicit-off", JUN_01_2023, Some(false)))
        .unwrap();
    store
        .create_post(&new_post("promoted", JAN_01_2023, Some(true)))
        .unwrap();

    let featured = store.featured_posts().unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].slug, "promoted");
}

#[test]
fn featured_posts_order_june_before_january() {
    let mut store = MemStorage::new();
    store
        .create_post(&new_post("january", JAN_01_2023, Some(true)))
        .unwrap();
    store
        .create_post(&new_post("june", JUN_01_2023, Some(true)))
        .unwrap();

    let featured = store.featured_posts().unwrap();
    let slugs: Vec<&str> = featured.iter().map(|post| post.slug.as_str()).collect();
    assert_eq!(slugs, vec!["june", "january"]);
}

#[test]
fn posts_by_category_filters_and_sorts() {
    let mut store = MemStorage::new();
    let mut in_category = new_post("in-a", JAN_01_2023, None);
    in_category.category_id = 7;
    store.create_post(&in_category).unwrap();

    let mut also_in = new_post("in-b", JUN_01_2023, None);
    also_in.category_id = 7;
    store.create_post(&also_in).unwrap();

    let mut other = new_post("other", DEC_31_2023, None);
    other.category_id = 9;
    store.create_post(&other).unwrap();

    let posts = store.posts_by_category(7).unwrap();
    let slugs: Vec<&str> = posts.iter().map(|post| post.slug.as_str()).collect();
    assert_eq!(slugs, vec!["in-b", "in-a"]);
}

#[test]
fn post_tag_links_drive_both_join_directions() {
    let mut store = MemStorage::new();
    let tagged = store.create_post(&new_post("tagged", JAN_01_2023, None)).unwrap();
    let untagged = store.create_post(&new_post("untagged", JAN_01_2023, None)).unwrap();
    let tag = store
        .create_tag(&NewTag {
            name: "ETL".to_string(),
            slug: "etl".to_string(),
        })
        .unwrap();

    store
        .create_post_tag(&NewPostTag {
            post_id: tagged.id,
            tag_id: tag.id,
        })
        .unwrap();

    let tags = store.tags_by_post(tagged.id).unwrap();
    assert_eq!(tags, vec![tag.clone()]);
    assert!(store.tags_by_post(untagged.id).unwrap().is_empty());

    let posts = store.posts_by_tag(tag.id).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, tagged.id);
    assert!(store.posts_by_tag(tag.id + 1).unwrap().is_empty());
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let mut store = MemStorage::new();
    let mut post = new_post("airflow", JAN_01_2023, None);
    post.title = "Building Resilient Data Pipelines".to_string();
    post.excerpt = "Fault-tolerant orchestration".to_string();
    post.content = "Airflow sensors and SLAs in production".to_string();
    store.create_post(&post).unwrap();

    assert_eq!(store.search_posts("RESILIENT").unwrap().len(), 1);
    assert_eq!(store.search_posts("resilient").unwrap().len(), 1);
    assert_eq!(store.search_posts("orchestration").unwrap().len(), 1);
    assert_eq!(store.search_posts("sensors").unwrap().len(), 1);
    assert!(store.search_posts("kubernetes").unwrap().is_empty());
}

#[test]
fn search_case_folding_is_unicode_aware() {
    let mut store = MemStorage::new();
    let mut post = new_post("cafe-notes", JAN_01_2023, None);
    post.title = "Notes from the CAFÉ".to_string();
    store.create_post(&post).unwrap();

    assert_eq!(store.search_posts("café").unwrap().len(), 1);
    assert_eq!(store.search_posts("CAFÉ").unwrap().len(), 1);
}

#[test]
fn empty_query_sent_to_the_store_matches_every_post() {
    // The blank guard lives in the service layer; the raw store treats an
    // empty needle as a universal match.
    let mut store = MemStorage::new();
    store.create_post(&new_post("a", JAN_01_2023, None)).unwrap();
    store.create_post(&new_post("b", JUN_01_2023, None)).unwrap();

    assert_eq!(store.search_posts("").unwrap().len(), 2);
}

#[test]
fn category_scenario_preserves_all_fields() {
    let mut store = MemStorage::new();
    store
        .create_category(&NewCategory {
            name: "X".to_string(),
            slug: "x".to_string(),
            description: "d".to_string(),
            icon: "database".to_string(),
            color: "blue".to_string(),
        })
        .unwrap();

    let loaded = store.category_by_slug("x").unwrap().unwrap();
    assert_eq!(loaded.id, 1);
    assert_eq!(loaded.name, "X");
    assert_eq!(loaded.description, "d");
    assert_eq!(loaded.icon, "database");
    assert_eq!(loaded.color, "blue");
}

#[test]
fn project_defaults_merge_at_create_time() {
    let mut store = MemStorage::new();
    let created = store
        .create_project(&NewProject {
            title: "Side Project".to_string(),
            slug: "side-project".to_string(),
            description: "Weekend build".to_string(),
            cover_image: "/images/side.jpg".to_string(),
            technologies: vec!["Rust".to_string()],
            category_id: 1,
            featured: None,
            url: None,
        })
        .unwrap();

    assert!(!created.featured);
    assert_eq!(created.url, None);
    assert!(store.featured_projects().unwrap().is_empty());

    let by_slug = store.project_by_slug("side-project").unwrap().unwrap();
    assert_eq!(by_slug.technologies, vec!["Rust".to_string()]);
}

#[test]
fn user_lookup_by_username() {
    let mut store = MemStorage::new();
    let created = store
        .create_user(&NewUser {
            username: "admin".to_string(),
            password: "opaque".to_string(),
        })
        .unwrap();

    let loaded = store.user_by_username("admin").unwrap().unwrap();
    assert_eq!(loaded, created);
    assert!(store.user_by_username("ghost").unwrap().is_none());
    assert_eq!(store.user(created.id).unwrap(), Some(loaded));
}

#[test]
fn subscription_roundtrip_and_store_assigned_timestamp() {
    let mut store = MemStorage::new();
    let created = store
        .create_subscription(&NewSubscription {
            email: "a@example.com".to_string(),
        })
        .unwrap();
    // 2020-01-01T00:00:00Z; the store clock stamps insert time itself.
    assert!(created.created_at > 1_577_836_800_000);

    let found = store.subscription_by_email("a@example.com").unwrap().unwrap();
    assert_eq!(found, created);
    assert!(store.subscription_by_email("b@example.com").unwrap().is_none());
}

#[test]
fn duplicate_subscription_is_not_rejected_by_the_store_itself() {
    // The in-memory backend documents uniqueness as the caller's pre-check;
    // inserting the same email twice directly must succeed with a new id.
    let mut store = MemStorage::new();
    let first = store
        .create_subscription(&NewSubscription {
            email: "a@example.com".to_string(),
        })
        .unwrap();
    let second = store
        .create_subscription(&NewSubscription {
            email: "a@example.com".to_string(),
        })
        .unwrap();

    assert!(second.id > first.id);
}
