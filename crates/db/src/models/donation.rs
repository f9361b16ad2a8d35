//! Donation models and DTOs.

use sadaqah_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: Money,
    pub currency: String,
    pub frequency: String,
    pub status: String,
    pub cause: Option<String>,
    pub urgent_need_id: Option<DbId>,
    pub stripe_payment_intent_id: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new donation (created `pending`).
#[derive(Debug, Clone)]
pub struct CreateDonation {
    pub user_id: Option<DbId>,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: Money,
    pub currency: String,
    pub frequency: String,
    pub cause: Option<String>,
    pub urgent_need_id: Option<DbId>,
    pub stripe_payment_intent_id: Option<String>,
    pub is_anonymous: bool,
    pub message: Option<String>,
}

/// Request body for an admin status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDonationStatus {
    pub status: String,
}

/// Filters for the admin donation list.
#[derive(Debug, Default, Deserialize)]
pub struct DonationFilter {
    pub status: Option<String>,
    pub frequency: Option<String>,
}
