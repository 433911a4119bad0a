//! # Stash API Client
//!
//! Provides Stash (Bitbucket Server) REST API integration for looking up pull
//! requests and attaching build statuses to commits.

mod client;
pub mod consts;
mod endpoints;
pub mod models;
mod source_host;

// Re-export the client
pub use client::{StashClient, create_stash_client};
// Re-export models
pub use models::{BuildStatusPayload, StashAuth, StashPullRequest, StashRef};
