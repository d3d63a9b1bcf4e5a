//! Client side of the cat registry.
//!
//! [`CatClient`] speaks to the gateway over HTTP; [`actions`] runs the
//! view-model reducer from `catdb_core` against it.

pub mod actions;
pub mod client;

pub use client::{CatClient, ClientError, ClientResult, GatewayResponse};
