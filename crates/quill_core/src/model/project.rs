//! Portfolio project records.

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

/// Portfolio entry as served to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub title: String,
    /// Unique URL-safe addressing key.
    pub slug: String,
    pub description: String,
    pub cover_image: String,
    /// Ordered list of technology labels, preserved as given.
    pub technologies: Vec<String>,
    pub category_id: EntityId,
    /// Promotional placement flag.
    pub featured: bool,
    /// External project link, absent for offline work.
    pub url: Option<String>,
}

/// Insert shape for [`Project`]. The store assigns `id` and merges defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub cover_image: String,
    pub technologies: Vec<String>,
    pub category_id: EntityId,
    /// `None` means "not featured".
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
}
