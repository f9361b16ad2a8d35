//! Repository for the `slideshow_slides` table.

use sadaqah_core::types::DbId;
use sqlx::PgPool;

use crate::models::slideshow::{CreateSlide, Slide, UpdateSlide};

const COLUMNS: &str = "id, title, subtitle, image_url, link_url, sort_order, is_active, \
                        created_at, updated_at";

pub struct SlideshowRepo;

impl SlideshowRepo {
    /// Insert a slide. Without an explicit `sort_order` it goes last.
    pub async fn create(pool: &PgPool, input: &CreateSlide) -> Result<Slide, sqlx::Error> {
        let query = format!(
            "INSERT INTO slideshow_slides
                 (title, subtitle, image_url, link_url, sort_order, is_active)
             VALUES ($1, $2, $3, $4,
                     COALESCE($5, (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM slideshow_slides)),
                     COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slideshow_slides WHERE id = $1");
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All slides in display order.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Slide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slideshow_slides
             WHERE (NOT $1 OR is_active)
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSlide,
    ) -> Result<Option<Slide>, sqlx::Error> {
        let query = format!(
            "UPDATE slideshow_slides SET
                 title = COALESCE($2, title),
                 subtitle = COALESCE($3, subtitle),
                 image_url = COALESCE($4, image_url),
                 link_url = COALESCE($5, link_url),
                 sort_order = COALESCE($6, sort_order),
                 is_active = COALESCE($7, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Slide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.image_url)
            .bind(&input.link_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Set `sort_order` to each slide's position in `ids`.
    ///
    /// Runs in one transaction. Returns the number of slides updated; ids
    /// that do not exist are skipped.
    pub async fn reorder(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut updated = 0;
        for (position, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE slideshow_slides SET sort_order = $2 WHERE id = $1")
                .bind(id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slideshow_slides WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
