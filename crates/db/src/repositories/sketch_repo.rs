//! Repository for the `sketches` table.

use sketchbook_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::sketch::{NewSketch, Sketch, SketchFilter, SketchPatch, SketchRow};
use crate::store::{Store, WriteMode};

/// Expanded select: the sketch plus the display fields of its lookups.
const SELECT_EXPANDED: &str = "\
    SELECT s.id, s.title, \
        s.category_id, c.name AS category_name, \
        s.color_id, co.name AS color_name, co.hex AS color_hex, \
        s.style_id, st.name AS style_name, \
        s.image, s.created_at, s.updated_at \
    FROM sketches s \
    LEFT JOIN categories c ON c.id = s.category_id \
    LEFT JOIN colors co ON co.id = s.color_id \
    LEFT JOIN styles st ON st.id = s.style_id";

/// Provides CRUD operations for sketches.
pub struct SketchRepo;

impl SketchRepo {
    /// Insert a sketch and return it expanded.
    ///
    /// The insert only happens if `category_id` names an existing category;
    /// otherwise nothing is written and `None` is returned. Under
    /// [`WriteMode::Atomic`] the insert and the re-fetch share a transaction.
    pub async fn create(store: &Store, input: &NewSketch) -> Result<Option<Sketch>, sqlx::Error> {
        match store.write_mode() {
            WriteMode::Atomic => {
                let mut tx = store.pool().begin().await?;
                let Some(id) = insert(&mut *tx, input).await? else {
                    tx.rollback().await?;
                    return Ok(None);
                };
                let sketch = fetch_expanded(&mut *tx, id).await?;
                tx.commit().await?;
                Ok(sketch)
            }
            WriteMode::BestEffort => {
                let Some(id) = insert(store.pool(), input).await? else {
                    return Ok(None);
                };
                fetch_expanded(store.pool(), id).await
            }
        }
    }

    /// List sketches matching `filter`, newest first.
    pub async fn list(pool: &PgPool, filter: &SketchFilter) -> Result<Vec<Sketch>, sqlx::Error> {
        let query = format!(
            "{SELECT_EXPANDED} \
             WHERE ($1::BIGINT IS NULL OR s.category_id = $1) \
               AND ($2::BIGINT IS NULL OR s.color_id = $2) \
               AND ($3::BIGINT IS NULL OR s.style_id = $3) \
             ORDER BY s.created_at DESC, s.id DESC"
        );
        let rows = sqlx::query_as::<_, SketchRow>(&query)
            .bind(filter.category_id)
            .bind(filter.color_id)
            .bind(filter.style_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Sketch::from).collect())
    }

    /// Apply a patch and return the updated sketch, expanded.
    ///
    /// Returns `None` if no sketch with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &SketchPatch,
    ) -> Result<Option<Sketch>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE sketches SET \
                title = COALESCE($2, title), \
                category_id = COALESCE($3, category_id), \
                color_id = CASE WHEN $4::BOOLEAN THEN $5::BIGINT ELSE color_id END, \
                style_id = CASE WHEN $6::BOOLEAN THEN $7::BIGINT ELSE style_id END, \
                image = CASE WHEN $8::BOOLEAN THEN $9::TEXT ELSE image END \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&patch.title)
        .bind(patch.category_id)
        .bind(patch.color_id.is_some())
        .bind(patch.color_id.flatten())
        .bind(patch.style_id.is_some())
        .bind(patch.style_id.flatten())
        .bind(patch.image.is_some())
        .bind(patch.image.clone().flatten())
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => fetch_expanded(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a sketch. Returns `true` if a row was deleted.
    ///
    /// Under [`WriteMode::Atomic`] the delete runs in its own transaction.
    pub async fn delete(store: &Store, id: DbId) -> Result<bool, sqlx::Error> {
        match store.write_mode() {
            WriteMode::Atomic => {
                let mut tx = store.pool().begin().await?;
                let deleted = delete_row(&mut *tx, id).await?;
                tx.commit().await?;
                Ok(deleted)
            }
            WriteMode::BestEffort => delete_row(store.pool(), id).await,
        }
    }
}

async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    input: &NewSketch,
) -> Result<Option<DbId>, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO sketches (title, category_id, color_id, style_id, image) \
         SELECT $1::TEXT, $2::BIGINT, $3::BIGINT, $4::BIGINT, $5::TEXT \
         WHERE EXISTS (SELECT 1 FROM categories WHERE id = $2::BIGINT) \
         RETURNING id",
    )
    .bind(&input.title)
    .bind(input.category_id)
    .bind(input.color_id)
    .bind(input.style_id)
    .bind(&input.image)
    .fetch_optional(executor)
    .await
}

async fn fetch_expanded<'e, E: PgExecutor<'e>>(
    executor: E,
    id: DbId,
) -> Result<Option<Sketch>, sqlx::Error> {
    let query = format!("{SELECT_EXPANDED} WHERE s.id = $1");
    let row = sqlx::query_as::<_, SketchRow>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.map(Sketch::from))
}

async fn delete_row<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sketches WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
