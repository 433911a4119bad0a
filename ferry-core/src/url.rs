//! Server URL helpers.

use anyhow::{Result, anyhow};
use url::Url;

/// Normalize a server base URL given on the command line.
///
/// A missing scheme defaults to `https://`, and trailing slashes are removed
/// so endpoint paths can be appended with `format!("{base}/rest/...")`.
pub fn normalize_base_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow!("Server URL cannot be empty"));
  }

  let url = match Url::parse(trimmed) {
    // "host:port" parses as scheme "host" without a host part
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  let mut normalized = url.to_string();
  while normalized.ends_with('/') {
    normalized.pop();
  }
  Ok(normalized)
}

fn parse_with_https_prefix(input: &str) -> Result<Url> {
  let with_scheme = format!("https://{input}");
  Url::parse(&with_scheme).map_err(|e| anyhow!("Failed to parse URL '{input}': {e}"))
}
