//! Recurring donation (subscription) models and DTOs.

use sadaqah_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub donor_email: String,
    pub amount: Money,
    pub currency: String,
    pub billing_interval: String,
    pub status: String,
    pub stripe_subscription_id: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a subscription confirmed by the payment provider.
#[derive(Debug, Clone)]
pub struct UpsertSubscription {
    pub user_id: Option<DbId>,
    pub donor_email: String,
    pub amount: Money,
    pub currency: String,
    pub billing_interval: String,
    pub stripe_subscription_id: String,
    pub stripe_customer_id: Option<String>,
    pub current_period_end: Option<Timestamp>,
}

/// Filters for the admin subscription list.
#[derive(Debug, Default, Deserialize)]
pub struct SubscriptionFilter {
    pub status: Option<String>,
}
