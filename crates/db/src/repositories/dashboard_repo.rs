//! Read-only aggregates for the admin dashboard.

use sadaqah_core::{donation, moderation, roles};
use sqlx::PgPool;

use crate::models::dashboard::DashboardSummary;

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        sqlx::query_as::<_, DashboardSummary>(
            "SELECT
                 (SELECT COALESCE(SUM(amount), 0) FROM donations WHERE status = $1)
                     AS total_raised,
                 (SELECT COUNT(*) FROM donations WHERE status = $1) AS completed_donations,
                 (SELECT COUNT(*) FROM donations WHERE status = $2) AS pending_donations,
                 (SELECT COUNT(*) FROM subscriptions WHERE status = $3) AS active_subscriptions,
                 (SELECT COUNT(*) FROM users WHERE role = $4 AND is_active) AS registered_donors,
                 (SELECT COUNT(*) FROM volunteers WHERE status = $5) AS pending_volunteers,
                 (SELECT COUNT(*) FROM testimonials WHERE status = $5) AS pending_testimonials,
                 (SELECT COUNT(*) FROM contacts WHERE NOT is_read) AS unread_contacts",
        )
        .bind(donation::STATUS_COMPLETED)
        .bind(donation::STATUS_PENDING)
        .bind(donation::SUBSCRIPTION_ACTIVE)
        .bind(roles::ROLE_DONOR)
        .bind(moderation::STATUS_PENDING)
        .fetch_one(pool)
        .await
    }
}
