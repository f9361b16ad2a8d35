//! Repository for the `donations` table.

use sadaqah_core::donation::{STATUS_COMPLETED, STATUS_FAILED, STATUS_PENDING};
use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::donation::{CreateDonation, Donation, DonationFilter};

const COLUMNS: &str = "id, user_id, donor_name, donor_email, amount, currency, frequency, \
                        status, cause, urgent_need_id, stripe_payment_intent_id, \
                        is_anonymous, message, created_at, updated_at";

/// Provides data access for donations.
pub struct DonationRepo;

impl DonationRepo {
    /// Record a new donation in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateDonation) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations
                 (user_id, donor_name, donor_email, amount, currency, frequency, status,
                  cause, urgent_need_id, stripe_payment_intent_id, is_anonymous, message)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(input.user_id)
            .bind(&input.donor_name)
            .bind(&input.donor_email)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.frequency)
            .bind(STATUS_PENDING)
            .bind(&input.cause)
            .bind(input.urgent_need_id)
            .bind(&input.stripe_payment_intent_id)
            .bind(input.is_anonymous)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_payment_intent(
        pool: &PgPool,
        payment_intent_id: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE stripe_payment_intent_id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(payment_intent_id)
            .fetch_optional(pool)
            .await
    }

    /// List donations newest first, optionally filtered by status and frequency.
    pub async fn list(
        pool: &PgPool,
        filter: &DonationFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR frequency = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(&filter.status)
            .bind(&filter.frequency)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Donations made by a signed-in donor, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the status of a donation. Returns `None` if it does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("UPDATE donations SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Mark the donation behind a payment intent as completed and credit its
    /// urgent need, in one transaction.
    ///
    /// Returns `None` when no donation matches or it was already completed,
    /// so a redelivered webhook never credits twice.
    pub async fn complete_payment(
        pool: &PgPool,
        payment_intent_id: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE donations SET status = $2
             WHERE stripe_payment_intent_id = $1 AND status <> $2
             RETURNING {COLUMNS}"
        );
        let donation = sqlx::query_as::<_, Donation>(&query)
            .bind(payment_intent_id)
            .bind(STATUS_COMPLETED)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(d) = &donation {
            if let Some(need_id) = d.urgent_need_id {
                sqlx::query(
                    "UPDATE urgent_needs SET raised_amount = raised_amount + $2 WHERE id = $1",
                )
                .bind(need_id)
                .bind(d.amount)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(donation)
    }

    /// Mark the donation behind a payment intent as failed, unless it has
    /// already completed.
    pub async fn fail_payment(
        pool: &PgPool,
        payment_intent_id: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!(
            "UPDATE donations SET status = $2
             WHERE stripe_payment_intent_id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(payment_intent_id)
            .bind(STATUS_FAILED)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Delete a donation. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
