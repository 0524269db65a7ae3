//! Handlers for the lookup collections (categories, colors, styles).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sketchbook_core::error::CoreError;
use sketchbook_core::lookup::LookupKind;
use sketchbook_db::models::lookup::CreateLookup;
use sketchbook_db::repositories::lookup_repo::name_constraint;
use sketchbook_db::repositories::LookupRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/lookups
///
/// All categories, colors and styles, each sorted by name.
pub async fn list_lookups(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lookups = LookupRepo::list_all(state.store.pool()).await?;

    Ok(Json(lookups))
}

/// POST /api/lookups/{type}
///
/// Create a category, color or style. `hex` is only kept for colors.
/// A name already used in the same collection is a validation error.
pub async fn create_lookup(
    State(state): State<AppState>,
    AppPath(segment): AppPath<String>,
    AppJson(input): AppJson<CreateLookup>,
) -> AppResult<impl IntoResponse> {
    let kind = LookupKind::from_segment(&segment)?;
    let new = input.into_new(kind)?;

    let lookup = LookupRepo::create(state.store.pool(), kind, &new)
        .await
        .map_err(|err| {
            if sketchbook_db::is_unique_violation(&err, Some(name_constraint(kind))) {
                AppError::Core(CoreError::Validation(format!(
                    "{} '{}' already exists",
                    kind.label(),
                    new.name
                )))
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(
        lookup_id = lookup.id,
        kind = %kind,
        name = %lookup.name,
        "Lookup created",
    );

    Ok((StatusCode::CREATED, Json(lookup)))
}
