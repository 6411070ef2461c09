//! todosync_client - optimistic-update client for the todosync API.
//!
//! The interesting part lives in [`controller`]: a mutation controller
//! that speculatively patches a local query cache before the remote
//! append resolves, rolls back to a snapshot on failure, and reconciles
//! with the authoritative store on settlement either way.

pub mod cache;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod output;
pub mod remote;

pub use cache::QueryCache;
pub use config::ClientConfig;
pub use controller::{MutationController, SubmitOutcome};
pub use error::{ClientError, Result};
pub use http::TodoApiClient;
pub use remote::RemoteTodos;
