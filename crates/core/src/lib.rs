//! Shared domain layer for the cat registry.
//!
//! Holds the record types, the field schema both the gateway and the store
//! validate against, and the client view-model reducer. Nothing in here
//! touches the database or the network.

pub mod cat;
pub mod error;
pub mod types;
pub mod view_model;
