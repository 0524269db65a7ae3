//! Handlers for sketches.
//!
//! Lookup references are always returned expanded. Create and delete run
//! under the store's write strategy (see [`sketchbook_db::WriteMode`]).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sketchbook_core::error::CoreError;
use sketchbook_core::ids::parse_id;
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::DbId;
use sketchbook_db::models::sketch::{CreateSketch, SketchFilter, SketchListParams, UpdateSketch};
use sketchbook_db::repositories::{LookupRepo, SketchRepo};
use sketchbook_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::DELETED;
use crate::state::AppState;

/// GET /api/sketches?category_id=&color_id=&style_id=
///
/// Each filter value may be a lookup id or a lookup name. Newest first.
pub async fn list_sketches(
    State(state): State<AppState>,
    Query(params): Query<SketchListParams>,
) -> AppResult<impl IntoResponse> {
    let pool = state.store.pool();
    let filter = resolve_filter(pool, &params).await?;
    let sketches = SketchRepo::list(pool, &filter).await?;

    tracing::debug!(?filter, count = sketches.len(), "Sketches listed");

    Ok(Json(sketches))
}

/// POST /api/sketches
pub async fn create_sketch(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSketch>,
) -> AppResult<impl IntoResponse> {
    let new = input.into_new()?;

    let sketch = SketchRepo::create(&state.store, &new)
        .await?
        .ok_or_else(|| missing_category(new.category_id))?;

    tracing::info!(
        sketch_id = sketch.id,
        category_id = new.category_id,
        write_mode = %state.store.write_mode(),
        "Sketch created",
    );

    Ok((StatusCode::CREATED, Json(sketch)))
}

/// PUT /api/sketches/{id}
///
/// Supplied fields overwrite; absent fields are left unchanged.
pub async fn update_sketch(
    State(state): State<AppState>,
    AppPath(sketch_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSketch>,
) -> AppResult<impl IntoResponse> {
    let patch = input.into_patch()?;
    let pool = state.store.pool();

    if let Some(category_id) = patch.category_id {
        if !LookupRepo::exists(pool, LookupKind::Category, category_id).await? {
            return Err(missing_category(category_id));
        }
    }

    let sketch = SketchRepo::update(pool, sketch_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sketch",
            id: sketch_id,
        }))?;

    tracing::info!(sketch_id, "Sketch updated");

    Ok(Json(sketch))
}

/// DELETE /api/sketches/{id}
///
/// Idempotent: an unknown id gets the same `{ "message": "Deleted" }` body.
pub async fn delete_sketch(
    State(state): State<AppState>,
    AppPath(sketch_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SketchRepo::delete(&state.store, sketch_id).await?;

    tracing::info!(
        sketch_id,
        deleted,
        write_mode = %state.store.write_mode(),
        "Sketch delete requested",
    );

    Ok(Json(DELETED))
}

fn missing_category(category_id: DbId) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "category_id {category_id} does not reference an existing category"
    )))
}

/// Turn raw filter parameters into ids.
async fn resolve_filter(
    pool: &DbPool,
    params: &SketchListParams,
) -> Result<SketchFilter, sqlx::Error> {
    Ok(SketchFilter {
        category_id: resolve_reference(pool, LookupKind::Category, params.category_id.as_deref())
            .await?,
        color_id: resolve_reference(pool, LookupKind::Color, params.color_id.as_deref()).await?,
        style_id: resolve_reference(pool, LookupKind::Style, params.style_id.as_deref()).await?,
    })
}

/// Resolve one filter value.
///
/// Blank means no filter. An integer is taken as an id. Anything else is
/// looked up by name; a name that matches nothing drops the filter.
async fn resolve_reference(
    pool: &DbPool,
    kind: LookupKind,
    value: Option<&str>,
) -> Result<Option<DbId>, sqlx::Error> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if let Some(id) = parse_id(value) {
        return Ok(Some(id));
    }

    let found = LookupRepo::find_by_name(pool, kind, value).await?;
    if found.is_none() {
        tracing::debug!(kind = %kind, name = value, "Filter name matched no lookup, ignoring");
    }
    Ok(found.map(|lookup| lookup.id))
}
