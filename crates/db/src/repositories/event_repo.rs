//! Repository for the `events` table.

use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

const COLUMNS: &str = "id, title, description, location, starts_at, ends_at, image_url, \
                        is_published, created_at, updated_at";

/// Filters for event listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventListFilter {
    /// Only events that have not yet ended (or started, when no end is set).
    pub upcoming_only: bool,
    /// Hide unpublished events (public site).
    pub published_only: bool,
}

pub struct EventRepo;

impl EventRepo {
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                 (title, description, location, starts_at, ends_at, image_url, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events in chronological order of their start time.
    pub async fn list(
        pool: &PgPool,
        filter: EventListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE (NOT $1 OR COALESCE(ends_at, starts_at) >= NOW())
               AND (NOT $2 OR is_published)
             ORDER BY starts_at ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.upcoming_only)
            .bind(filter.published_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                 title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 location = COALESCE($4, location),
                 starts_at = COALESCE($5, starts_at),
                 ends_at = COALESCE($6, ends_at),
                 image_url = COALESCE($7, image_url),
                 is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
