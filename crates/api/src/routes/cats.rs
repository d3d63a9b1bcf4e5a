//! Route definitions for cat records.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::cats;
use crate::state::AppState;

/// Cat routes, mounted at the root.
///
/// ```text
/// GET    /cats               -> list_cats
/// POST   /add-cat            -> create_cat
/// PUT    /update-cat/{id}    -> update_cat
/// DELETE /delete-cat/{id}    -> delete_cat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cats", get(cats::list_cats))
        .route("/add-cat", post(cats::create_cat))
        .route("/update-cat/{id}", put(cats::update_cat))
        .route("/delete-cat/{id}", delete(cats::delete_cat))
}
