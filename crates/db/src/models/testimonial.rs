//! Testimonial models and DTOs.

use sadaqah_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub author_name: String,
    pub author_role: Option<String>,
    pub content: String,
    pub rating: Option<i16>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public submission; always stored as `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonial {
    pub author_name: String,
    pub author_role: Option<String>,
    pub content: String,
    pub rating: Option<i16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTestimonialStatus {
    pub status: String,
}
