//! # Stash API Endpoints
//!
//! Endpoint implementations grouped by resource: pull requests of the
//! configured repository and build statuses of commits.

pub mod build_status;
pub mod pull_requests;
