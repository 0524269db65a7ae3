pub mod health;
pub mod lookups;
pub mod sketches;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /lookups                 list all (GET)
/// /lookups/{type}          create (POST), type = categories | colors | styles
///
/// /sketches                list with ?category_id=&color_id=&style_id= (GET), create (POST)
/// /sketches/{id}           update (PUT), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/lookups", lookups::router())
        .nest("/sketches", sketches::router())
}
