//! Admin dashboard aggregate.

use sadaqah_core::types::Money;
use serde::Serialize;
use sqlx::FromRow;

/// Headline numbers for the admin console landing page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardSummary {
    /// Sum of `completed` donations.
    pub total_raised: Money,
    pub completed_donations: i64,
    pub pending_donations: i64,
    pub active_subscriptions: i64,
    pub registered_donors: i64,
    pub pending_volunteers: i64,
    pub pending_testimonials: i64,
    pub unread_contacts: i64,
}
