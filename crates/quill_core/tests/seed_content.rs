use quill_core::db::open_db_in_memory;
use quill_core::{seed_demo_content, MemStorage, NewUser, SqliteStorage, Storage};

#[test]
fn seeded_memory_store_is_immediately_queryable() {
    let mut store = MemStorage::new();
    let summary = seed_demo_content(&mut store).unwrap();

    assert_eq!(summary.categories, 4);
    assert_eq!(summary.tags, 8);
    assert_eq!(summary.posts, 4);
    assert_eq!(summary.projects, 3);

    // Seeding runs to completion before the store is handed out, so every
    // lookup below must resolve with no settling delay.
    let category = store
        .category_by_slug("data-engineering")
        .unwrap()
        .expect("seeded category should resolve by slug");
    assert_eq!(category.name, "Data Engineering");

    let posts = store.posts_by_category(category.id).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].slug,
        "building-resilient-data-pipelines-apache-airflow"
    );

    let admin = store.user_by_username("admin").unwrap();
    assert!(admin.is_some());
}

#[test]
fn seeded_featured_posts_are_newest_first() {
    let mut store = MemStorage::new();
    seed_demo_content(&mut store).unwrap();

    let featured = store.featured_posts().unwrap();
    let slugs: Vec<&str> = featured.iter().map(|post| post.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec![
            // 2023-06-01 sorts before 2023-01-01.
            "building-resilient-data-pipelines-apache-airflow",
            "practical-deep-learning-pytorch",
        ]
    );
}

#[test]
fn seeded_post_tag_links_resolve_both_ways() {
    let mut store = MemStorage::new();
    seed_demo_content(&mut store).unwrap();

    let post = store
        .post_by_slug("building-resilient-data-pipelines-apache-airflow")
        .unwrap()
        .unwrap();
    let tag_slugs: Vec<String> = store
        .tags_by_post(post.id)
        .unwrap()
        .into_iter()
        .map(|tag| tag.slug)
        .collect();
    assert_eq!(tag_slugs, vec!["etl", "big-data"]);

    let etl = store.tag_by_slug("etl").unwrap().unwrap();
    let etl_posts = store.posts_by_tag(etl.id).unwrap();
    // The Airflow and serverless posts both carry the ETL tag.
    assert_eq!(etl_posts.len(), 2);
    assert_eq!(etl_posts[0].slug, "serverless-etl-aws");
}

#[test]
fn seeded_posts_carry_the_created_admin_id() {
    // Occupy the first user id so the admin account lands elsewhere; the
    // seed must wire author linkage from the id the store returned.
    let mut store = MemStorage::new();
    store
        .create_user(&NewUser {
            username: "earlier".to_string(),
            password: "opaque".to_string(),
        })
        .unwrap();
    seed_demo_content(&mut store).unwrap();

    let admin = store.user_by_username("admin").unwrap().unwrap();
    assert_eq!(admin.id, 2);
    for post in store.all_posts().unwrap() {
        assert_eq!(post.author_id, admin.id);
    }
}

#[test]
fn seed_satisfies_sqlite_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStorage::new(&conn);
    let summary = seed_demo_content(&mut store).unwrap();

    assert_eq!(summary.posts, 4);
    let featured = store.featured_projects().unwrap();
    assert_eq!(featured.len(), 2);

    let project = store
        .project_by_slug("realtime-analytics-pipeline")
        .unwrap()
        .unwrap();
    assert_eq!(project.technologies, vec!["Kafka", "Flink", "ClickHouse"]);
}
