//! Response envelopes for the cat endpoints.
//!
//! Field names are camelCase on the wire; the list endpoint returns a bare
//! array and needs no envelope.

use catdb_core::cat::Cat;
use serde::Serialize;

pub const MSG_CREATED: &str = "Successfully added cat to the database";
pub const MSG_UPDATED: &str = "Successfully updated cat information";
pub const MSG_DELETED: &str = "Successfully removed cat from database";

/// `POST /add-cat` success body.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub cat: Cat,
}

/// `PUT /update-cat/{id}` success body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedResponse {
    pub message: &'static str,
    pub updated_cat: Cat,
}

/// Body carrying only a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
