//! Handlers for cat records.
//!
//! Bodies are validated once here against the shared schema; the store
//! re-checks constraints before writing. Update resolves the id before
//! looking at the fields.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catdb_core::cat::{NewCat, ENTITY};
use catdb_core::error::CoreError;
use catdb_core::types::CatId;

use crate::error::{AppError, AppResult};
use crate::extract::JsonObject;
use crate::response::{
    CreatedResponse, MessageResponse, UpdatedResponse, MSG_CREATED, MSG_DELETED, MSG_UPDATED,
};
use crate::state::AppState;

/// Parse the schema-level payload, mapping failures to 400.
fn parse_payload(body: &JsonObject) -> AppResult<NewCat> {
    NewCat::from_json(&body.0).map_err(|errors| AppError::Core(CoreError::Validation(errors)))
}

/// GET /cats
///
/// List every cat, oldest first.
pub async fn list_cats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cats = state.store.list().await?;
    Ok(Json(cats))
}

/// POST /add-cat
///
/// Create a cat. Responds 201 with the stored record.
pub async fn create_cat(
    State(state): State<AppState>,
    body: JsonObject,
) -> AppResult<impl IntoResponse> {
    let input = parse_payload(&body)?;
    let cat = state.store.create(&input).await?;

    tracing::info!(cat_id = %cat.id, name = %cat.name, "Cat created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: MSG_CREATED,
            cat,
        }),
    ))
}

/// PUT /update-cat/{id}
///
/// Replace every field of a cat. An empty body is rejected before anything
/// else; an unknown id is reported as 404 before the fields are validated.
/// An id that does not parse cannot exist and is also a 404.
pub async fn update_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonObject,
) -> AppResult<impl IntoResponse> {
    let body = body.require_non_empty()?;

    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: ENTITY,
            id: id.clone(),
        })
    };
    let cat_id: CatId = id.parse().map_err(|_| not_found())?;
    if state.store.find(cat_id).await?.is_none() {
        return Err(not_found());
    }

    let input = parse_payload(&body)?;
    let cat = state.store.update(cat_id, &input).await?;

    tracing::info!(cat_id = %cat.id, revision = cat.revision, "Cat updated");

    Ok(Json(UpdatedResponse {
        message: MSG_UPDATED,
        updated_cat: cat,
    }))
}

/// DELETE /delete-cat/{id}
///
/// Delete a cat. Responds 200 whether or not the cat existed.
pub async fn delete_cat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let removed = match id.parse::<CatId>() {
        Ok(cat_id) => state.store.delete(cat_id).await?,
        Err(_) => false,
    };

    if removed {
        tracing::info!(cat_id = %id, "Cat deleted");
    } else {
        tracing::info!(cat_id = %id, "Delete requested for unknown cat");
    }

    Ok(Json(MessageResponse {
        message: MSG_DELETED,
    }))
}
