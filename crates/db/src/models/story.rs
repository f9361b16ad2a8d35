//! Impact story models and DTOs.

use sadaqah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a story. `slug` is derived from the title when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStory {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// DTO for partially updating a story.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}
