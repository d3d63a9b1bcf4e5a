pub mod cats;

use axum::Router;

use crate::state::AppState;

/// Build the route tree.
///
/// Route hierarchy:
///
/// ```text
/// GET    /cats                list all cats
/// POST   /add-cat             create a cat
/// PUT    /update-cat/{id}     replace a cat
/// DELETE /delete-cat/{id}     delete a cat
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(cats::router())
}
