//! Volunteer application models and DTOs.

use sadaqah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `volunteers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Volunteer {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interests: Option<String>,
    pub availability: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public application; always stored as `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVolunteer {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub interests: Option<String>,
    pub availability: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVolunteerStatus {
    pub status: String,
}
