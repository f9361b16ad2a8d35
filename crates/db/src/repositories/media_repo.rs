//! Repository for the `media_items` table.

use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::media::{CreateMediaItem, MediaItem, UpdateMediaItem};

const COLUMNS: &str =
    "id, title, media_type, url, thumbnail_url, description, created_at, updated_at";

pub struct MediaRepo;

impl MediaRepo {
    pub async fn create(pool: &PgPool, input: &CreateMediaItem) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items (title, media_type, url, thumbnail_url, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&input.title)
            .bind(&input.media_type)
            .bind(&input.url)
            .bind(&input.thumbnail_url)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        media_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM media_items
             WHERE ($1::text IS NULL OR media_type = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(media_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaItem,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE media_items SET
                 title = COALESCE($2, title),
                 media_type = COALESCE($3, media_type),
                 url = COALESCE($4, url),
                 thumbnail_url = COALESCE($5, thumbnail_url),
                 description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.media_type)
            .bind(&input.url)
            .bind(&input.thumbnail_url)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
