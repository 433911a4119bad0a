//! Constants shared by the ferry crates.

/// Stash REST API version used when neither the command line nor the config
/// file names one.
pub const DEFAULT_STASH_API_VERSION: &str = "1.0";

/// Stash project key used by default.
pub const DEFAULT_STASH_PROJECT: &str = "DF";

/// Stash repository slug used by default.
pub const DEFAULT_STASH_REPO_NAME: &str = "dava.framework";

/// Report description used when none is given.
pub const DEFAULT_DESCRIPTION: &str = "auto";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "ferry.toml";

/// Placeholder printed for missing branch or commit values.
pub const MISSING_VALUE: &str = "None";
