//! Constants for the ferry-stash client

/// User-Agent header value for the Stash API client
pub const USER_AGENT: &str = concat!("ferry/", env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Accept header value for the Stash REST API
pub const ACCEPT: &str = "application/json";

/// Version of the build-status REST API
pub const BUILD_STATUS_API_VERSION: &str = "1.0";
