use quill_core::{
    ContentService, MemStorage, NewCategory, NewPost, NewPostTag, NewTag, ServiceError, Storage,
};

// Epoch milliseconds UTC.
const JAN_01_2023: i64 = 1_672_531_200_000;
const JUN_01_2023: i64 = 1_685_577_600_000;

/// Store with one category, one tagged post and one loose post.
fn fixture() -> MemStorage {
    let mut store = MemStorage::new();
    let category = store
        .create_category(&NewCategory {
            name: "Data Engineering".to_string(),
            slug: "data-engineering".to_string(),
            description: "Pipelines and plumbing".to_string(),
            icon: "database".to_string(),
            color: "blue".to_string(),
        })
        .unwrap();
    let tag = store
        .create_tag(&NewTag {
            name: "ETL".to_string(),
            slug: "etl".to_string(),
        })
        .unwrap();

    let tagged = store
        .create_post(&NewPost {
            title: "Airflow in Anger".to_string(),
            slug: "airflow-in-anger".to_string(),
            excerpt: "Lessons from production".to_string(),
            content: "Retries, SLAs, and sensors".to_string(),
            cover_image: "/images/airflow.jpg".to_string(),
            published_at: JUN_01_2023,
            featured: Some(true),
            reading_time: 7,
            category_id: category.id,
            author_id: 1,
        })
        .unwrap();
    store
        .create_post_tag(&NewPostTag {
            post_id: tagged.id,
            tag_id: tag.id,
        })
        .unwrap();

    store
        .create_post(&NewPost {
            title: "Untagged Thoughts".to_string(),
            slug: "untagged-thoughts".to_string(),
            excerpt: "Loose ends".to_string(),
            content: "No tags here".to_string(),
            cover_image: "/images/loose.jpg".to_string(),
            published_at: JAN_01_2023,
            featured: None,
            reading_time: 3,
            category_id: category.id,
            author_id: 1,
        })
        .unwrap();

    store
}

#[test]
fn post_detail_embeds_category_and_tags() {
    let service = ContentService::new(fixture());

    let detail = service.post_detail("airflow-in-anger").unwrap().unwrap();
    assert_eq!(detail.post.slug, "airflow-in-anger");
    let category = detail.category.expect("category should resolve");
    assert_eq!(category.slug, "data-engineering");
    assert_eq!(detail.tags.len(), 1);
    assert_eq!(detail.tags[0].slug, "etl");
}

#[test]
fn post_detail_for_unknown_slug_is_absent() {
    let service = ContentService::new(fixture());
    assert!(service.post_detail("missing").unwrap().is_none());
}

#[test]
fn post_detail_with_dangling_category_still_returns_post() {
    // MemStorage does not enforce referential integrity; the detail view
    // must surface the post with `category: None` rather than fail.
    let mut store = MemStorage::new();
    store
        .create_post(&NewPost {
            title: "Orphan".to_string(),
            slug: "orphan".to_string(),
            excerpt: "e".to_string(),
            content: "c".to_string(),
            cover_image: "/images/o.jpg".to_string(),
            published_at: JAN_01_2023,
            featured: None,
            reading_time: 1,
            category_id: 42,
            author_id: 1,
        })
        .unwrap();

    let service = ContentService::new(store);
    let detail = service.post_detail("orphan").unwrap().unwrap();
    assert!(detail.category.is_none());
    assert!(detail.tags.is_empty());
}

#[test]
fn posts_for_category_distinguishes_unknown_from_empty() {
    let mut store = fixture();
    store
        .create_category(&NewCategory {
            name: "Quiet".to_string(),
            slug: "quiet".to_string(),
            description: "Nothing published yet".to_string(),
            icon: "folder".to_string(),
            color: "gray".to_string(),
        })
        .unwrap();
    let service = ContentService::new(store);

    let known = service.posts_for_category("data-engineering").unwrap().unwrap();
    assert_eq!(known.len(), 2);
    assert_eq!(known[0].slug, "airflow-in-anger");

    let empty = service.posts_for_category("quiet").unwrap().unwrap();
    assert!(empty.is_empty());

    assert!(service.posts_for_category("missing").unwrap().is_none());
}

#[test]
fn posts_for_tag_resolves_slug_then_links() {
    let service = ContentService::new(fixture());

    let posts = service.posts_for_tag("etl").unwrap().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "airflow-in-anger");

    assert!(service.posts_for_tag("missing").unwrap().is_none());
}

#[test]
fn service_can_borrow_a_shared_store() {
    let mut store = fixture();
    {
        let service = ContentService::new(&mut store);
        assert!(service.post_detail("airflow-in-anger").unwrap().is_some());
    }

    // The store is untouched and usable once the borrowing service drops.
    assert!(store.post_by_slug("airflow-in-anger").unwrap().is_some());
}

#[test]
fn search_rejects_blank_queries() {
    let service = ContentService::new(fixture());

    assert!(matches!(
        service.search("   ").unwrap_err(),
        ServiceError::EmptyQuery
    ));
    assert!(matches!(
        service.search("").unwrap_err(),
        ServiceError::EmptyQuery
    ));

    let hits = service.search("AIRFLOW").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "airflow-in-anger");
}
