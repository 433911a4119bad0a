//! # TeamCity API Client
//!
//! Provides TeamCity REST API integration for reading build details, used to
//! link status reports back to the build that produced them.

mod client;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::{TeamCityClient, create_teamcity_client};
// Re-export models
pub use models::{TeamCityAuth, TeamCityBuild};
