//! Repository for the `urgent_needs` table.
//!
//! `raised_amount` is never written here; it only moves when a linked
//! donation completes (see `DonationRepo::complete_payment`).

use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::urgent_need::{CreateUrgentNeed, UpdateUrgentNeed, UrgentNeed};

const COLUMNS: &str = "id, title, slug, description, goal_amount, raised_amount, image_url, \
                        is_active, sort_order, created_at, updated_at";

pub struct UrgentNeedRepo;

impl UrgentNeedRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateUrgentNeed,
        slug: &str,
    ) -> Result<UrgentNeed, sqlx::Error> {
        let query = format!(
            "INSERT INTO urgent_needs
                 (title, slug, description, goal_amount, image_url, is_active, sort_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UrgentNeed>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.goal_amount)
            .bind(&input.image_url)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UrgentNeed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM urgent_needs WHERE id = $1");
        sqlx::query_as::<_, UrgentNeed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active need by slug (public micro-page).
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<UrgentNeed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM urgent_needs WHERE slug = $1 AND is_active");
        sqlx::query_as::<_, UrgentNeed>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UrgentNeed>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM urgent_needs
             WHERE ($1::boolean IS NULL OR is_active = $1)
             ORDER BY sort_order ASC, created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UrgentNeed>(&query)
            .bind(active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUrgentNeed,
    ) -> Result<Option<UrgentNeed>, sqlx::Error> {
        let query = format!(
            "UPDATE urgent_needs SET
                 title = COALESCE($2, title),
                 slug = COALESCE($3, slug),
                 description = COALESCE($4, description),
                 goal_amount = COALESCE($5, goal_amount),
                 image_url = COALESCE($6, image_url),
                 is_active = COALESCE($7, is_active),
                 sort_order = COALESCE($8, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UrgentNeed>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.goal_amount)
            .bind(&input.image_url)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM urgent_needs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
