//! Repository for the `volunteers` table.

use sadaqah_core::moderation::STATUS_PENDING;
use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::volunteer::{CreateVolunteer, Volunteer};

const COLUMNS: &str = "id, full_name, email, phone, interests, availability, message, \
                        status, created_at, updated_at";

pub struct VolunteerRepo;

impl VolunteerRepo {
    /// Store an application as `pending`. The email must already be normalized.
    pub async fn create(pool: &PgPool, input: &CreateVolunteer) -> Result<Volunteer, sqlx::Error> {
        let query = format!(
            "INSERT INTO volunteers
                 (full_name, email, phone, interests, availability, message, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Volunteer>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.interests)
            .bind(&input.availability)
            .bind(&input.message)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Volunteer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM volunteers WHERE id = $1");
        sqlx::query_as::<_, Volunteer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Volunteer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM volunteers
             WHERE ($1::text IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Volunteer>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Volunteer>, sqlx::Error> {
        let query = format!("UPDATE volunteers SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Volunteer>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM volunteers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
