//! Route definitions for sketches.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::sketches;
use crate::state::AppState;

/// Sketch routes mounted at `/sketches`.
///
/// ```text
/// GET    /                  -> list_sketches
/// POST   /                  -> create_sketch
/// PUT    /{id}              -> update_sketch
/// DELETE /{id}              -> delete_sketch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sketches::list_sketches).post(sketches::create_sketch),
        )
        .route(
            "/{id}",
            put(sketches::update_sketch).delete(sketches::delete_sketch),
        )
}
