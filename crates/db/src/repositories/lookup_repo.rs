//! Repository for the `categories`, `colors` and `styles` tables.

use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::lookup::{Lookup, LookupSet, NewLookup};

/// Column list for a lookup table. Non-color tables select a typed `NULL`
/// for `hex` so every kind maps onto [`Lookup`].
fn columns(kind: LookupKind) -> &'static str {
    if kind.has_hex() {
        "id, name, hex, created_at"
    } else {
        "id, name, NULL::TEXT AS hex, created_at"
    }
}

/// Name of the unique constraint on a lookup table's `name` column.
pub fn name_constraint(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::Category => "uq_categories_name",
        LookupKind::Color => "uq_colors_name",
        LookupKind::Style => "uq_styles_name",
    }
}

/// Provides read and insert operations for the three lookup tables.
pub struct LookupRepo;

impl LookupRepo {
    /// List every row of one lookup table, ordered by name ascending.
    pub async fn list(pool: &PgPool, kind: LookupKind) -> Result<Vec<Lookup>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY name ASC, id ASC",
            columns(kind),
            kind.table()
        );
        sqlx::query_as::<_, Lookup>(&query).fetch_all(pool).await
    }

    /// List all three lookup tables.
    pub async fn list_all(pool: &PgPool) -> Result<LookupSet, sqlx::Error> {
        Ok(LookupSet {
            categories: Self::list(pool, LookupKind::Category).await?,
            colors: Self::list(pool, LookupKind::Color).await?,
            styles: Self::list(pool, LookupKind::Style).await?,
        })
    }

    /// Insert a lookup row, returning it.
    ///
    /// A duplicate name fails with the table's `uq_*_name` unique violation.
    pub async fn create(
        pool: &PgPool,
        kind: LookupKind,
        input: &NewLookup,
    ) -> Result<Lookup, sqlx::Error> {
        if kind.has_hex() {
            let query = format!(
                "INSERT INTO {} (name, hex) VALUES ($1, $2) RETURNING {}",
                kind.table(),
                columns(kind)
            );
            sqlx::query_as::<_, Lookup>(&query)
                .bind(&input.name)
                .bind(&input.hex)
                .fetch_one(pool)
                .await
        } else {
            let query = format!(
                "INSERT INTO {} (name) VALUES ($1) RETURNING {}",
                kind.table(),
                columns(kind)
            );
            sqlx::query_as::<_, Lookup>(&query)
                .bind(&input.name)
                .fetch_one(pool)
                .await
        }
    }

    /// Find a lookup row by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE name = $1",
            columns(kind),
            kind.table()
        );
        sqlx::query_as::<_, Lookup>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, kind: LookupKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", kind.table());
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
