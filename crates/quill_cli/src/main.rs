//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quill_core` wiring: seed an
//!   in-memory store and print what a homepage request would see.
//! - Keep output deterministic for quick local sanity checks.

use quill_core::{seed_demo_content, MemStorage, Storage};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut store = MemStorage::new();
    let summary = seed_demo_content(&mut store)?;

    println!("quill_core version={}", quill_core::core_version());
    println!(
        "seeded categories={} tags={} posts={} projects={}",
        summary.categories, summary.tags, summary.posts, summary.projects
    );

    println!("featured posts (newest first):");
    for post in store.featured_posts()? {
        println!("  {} [{}]", post.title, post.slug);
    }

    println!("featured projects:");
    for project in store.featured_projects()? {
        println!("  {} [{}]", project.title, project.slug);
    }

    Ok(())
}
