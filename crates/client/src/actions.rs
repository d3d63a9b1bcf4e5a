//! Async action handlers for the view-model.
//!
//! Each handler takes the state by value, performs at most one mutation
//! plus a refresh, and returns the next state. Failures are logged and
//! recorded in `last_error`; the form is left as it was.

use catdb_core::types::CatId;
use catdb_core::view_model::{self, Action, RegistryState, SubmitError};

use crate::client::CatClient;

/// Fetch the record set.
pub async fn load(client: &CatClient, state: RegistryState) -> RegistryState {
    match client.list().await {
        Ok(cats) => view_model::reduce(state, Action::Loaded(cats)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch cats");
            view_model::reduce(state, Action::RequestFailed(e.to_string()))
        }
    }
}

/// Submit the open form as a create or an update, then refresh.
pub async fn submit(client: &CatClient, state: RegistryState) -> RegistryState {
    let request = match view_model::submit(&state) {
        Ok(request) => request,
        Err(SubmitError::FormHidden) => {
            tracing::debug!("Submit ignored, form is not open");
            return state;
        }
        Err(e @ SubmitError::Invalid(_)) => {
            tracing::warn!(error = %e, "Form failed validation");
            return view_model::reduce(state, Action::RequestFailed(e.to_string()));
        }
    };

    match client.execute(request).await {
        Ok(response) => {
            tracing::debug!(?response, "Form submitted");
            let state = view_model::reduce(state, Action::SubmitSucceeded);
            load(client, state).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to submit cat");
            view_model::reduce(state, Action::RequestFailed(e.to_string()))
        }
    }
}

/// Delete a cat, then refresh.
pub async fn remove(client: &CatClient, state: RegistryState, id: CatId) -> RegistryState {
    match client.delete(id).await {
        Ok(()) => load(client, state).await,
        Err(e) => {
            tracing::warn!(cat_id = %id, error = %e, "Failed to delete cat");
            view_model::reduce(state, Action::RequestFailed(e.to_string()))
        }
    }
}
