//! Repository for the `subscriptions` table.

use sadaqah_core::donation::{SUBSCRIPTION_ACTIVE, SUBSCRIPTION_CANCELLED};
use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::{Subscription, SubscriptionFilter, UpsertSubscription};

const COLUMNS: &str = "id, user_id, donor_email, amount, currency, billing_interval, status, \
                        stripe_subscription_id, stripe_customer_id, current_period_end, \
                        cancelled_at, created_at, updated_at";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Insert or refresh a subscription keyed by its provider id.
    ///
    /// Re-delivery of the same confirmation updates the existing row.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSubscription,
    ) -> Result<Subscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO subscriptions
                 (user_id, donor_email, amount, currency, billing_interval, status,
                  stripe_subscription_id, stripe_customer_id, current_period_end)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (stripe_subscription_id) DO UPDATE SET
                 user_id = COALESCE(EXCLUDED.user_id, subscriptions.user_id),
                 amount = EXCLUDED.amount,
                 currency = EXCLUDED.currency,
                 billing_interval = EXCLUDED.billing_interval,
                 stripe_customer_id = COALESCE(EXCLUDED.stripe_customer_id,
                                               subscriptions.stripe_customer_id),
                 current_period_end = COALESCE(EXCLUDED.current_period_end,
                                               subscriptions.current_period_end)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(input.user_id)
            .bind(&input.donor_email)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.billing_interval)
            .bind(SUBSCRIPTION_ACTIVE)
            .bind(&input.stripe_subscription_id)
            .bind(&input.stripe_customer_id)
            .bind(input.current_period_end)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subscriptions WHERE id = $1");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &SubscriptionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a subscription cancelled. Already-cancelled rows are left as is.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET
                 status = $2,
                 cancelled_at = COALESCE(cancelled_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(id)
            .bind(SUBSCRIPTION_CANCELLED)
            .fetch_optional(pool)
            .await
    }

    /// Cancel by provider id, as reported by a deletion webhook.
    pub async fn cancel_by_stripe_id(
        pool: &PgPool,
        stripe_subscription_id: &str,
    ) -> Result<Option<Subscription>, sqlx::Error> {
        let query = format!(
            "UPDATE subscriptions SET
                 status = $2,
                 cancelled_at = COALESCE(cancelled_at, NOW())
             WHERE stripe_subscription_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(stripe_subscription_id)
            .bind(SUBSCRIPTION_CANCELLED)
            .fetch_optional(pool)
            .await
    }
}
