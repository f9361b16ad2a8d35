//! Media gallery item models and DTOs.

use sadaqah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub title: String,
    pub media_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaItem {
    pub title: String,
    pub media_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMediaItem {
    pub title: Option<String>,
    pub media_type: Option<String>,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
}
