//! Route definitions for the lookup collections.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Lookup routes mounted at `/lookups`.
///
/// ```text
/// GET    /                  -> list_lookups
/// POST   /{type}            -> create_lookup
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lookups::list_lookups))
        .route("/{type}", post(lookups::create_lookup))
}
