//! Urgent-need micro-page models and DTOs.

use sadaqah_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `urgent_needs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UrgentNeed {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub goal_amount: Option<Money>,
    pub raised_amount: Money,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUrgentNeed {
    pub title: String,
    pub slug: Option<String>,
    pub description: String,
    pub goal_amount: Option<Money>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUrgentNeed {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub goal_amount: Option<Money>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
