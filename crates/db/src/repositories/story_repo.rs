//! Repository for the `stories` table.

use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::story::{CreateStory, Story, UpdateStory};

const COLUMNS: &str = "id, title, slug, summary, body, image_url, is_published, \
                        published_at, created_at, updated_at";

pub struct StoryRepo;

impl StoryRepo {
    /// Insert a story under an already-resolved slug.
    ///
    /// `published_at` is stamped when the story is created published.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStory,
        slug: &str,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (title, slug, summary, body, image_url, is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $6 THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published story by slug (public site).
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE slug = $1 AND is_published");
        sqlx::query_as::<_, Story>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List stories, newest publication first; drafts sort by creation time.
    pub async fn list(
        pool: &PgPool,
        published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE ($1::boolean IS NULL OR is_published = $1)
             ORDER BY COALESCE(published_at, created_at) DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Partially update a story.
    ///
    /// Publishing a draft stamps `published_at`; unpublishing clears it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                 title = COALESCE($2, title),
                 slug = COALESCE($3, slug),
                 summary = COALESCE($4, summary),
                 body = COALESCE($5, body),
                 image_url = COALESCE($6, image_url),
                 is_published = COALESCE($7, is_published),
                 published_at = CASE
                     WHEN NOT COALESCE($7, is_published) THEN NULL
                     WHEN published_at IS NULL THEN NOW()
                     ELSE published_at
                 END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
