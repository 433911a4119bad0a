//! # Source Downloads
//!
//! Fetches source archives and unpacks them into a library's source folder.
//! An existing source folder is taken as already downloaded.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use tar::Archive;
use tracing::{debug, info};

use crate::error::{Result, ThirdpartyError};

/// Fetches the bytes behind a URL
pub trait Downloader {
  fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP downloader
pub struct HttpDownloader {
  client: Client,
}

impl HttpDownloader {
  pub fn new() -> Result<Self> {
    let client = Client::builder()
      .user_agent(concat!("ferry/", env!("CARGO_PKG_VERSION")))
      .connect_timeout(Duration::from_secs(30))
      .build()
      .map_err(ThirdpartyError::HttpClient)?;
    Ok(Self { client })
  }
}

impl Downloader for HttpDownloader {
  fn fetch(&self, url: &str) -> Result<Vec<u8>> {
    info!("Downloading {url}");
    let download_error = |source| ThirdpartyError::Download {
      url: url.to_string(),
      source,
    };

    let response = self.client.get(url).send().map_err(download_error)?;
    let status = response.status();
    if !status.is_success() {
      return Err(ThirdpartyError::HttpStatus {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    let bytes = response.bytes().map_err(download_error)?;
    Ok(bytes.to_vec())
  }
}

/// Download `url` and unpack it into `source_dir` unless `source_dir` exists.
///
/// The archive's top-level directory is stripped, so `lua-5.3.3/src/lua.h`
/// lands at `<source_dir>/src/lua.h`. Returns whether anything was fetched.
pub fn download_and_extract(downloader: &dyn Downloader, url: &str, source_dir: &Path) -> Result<bool> {
  if source_dir.exists() {
    debug!("Sources already present in {}", source_dir.display());
    return Ok(false);
  }

  let bytes = downloader.fetch(url)?;

  // Unpack next to the destination first so a partial extraction never
  // looks like a complete source folder.
  let staging = staging_dir(source_dir);
  if staging.exists() {
    fs::remove_dir_all(&staging).map_err(ThirdpartyError::io(&staging))?;
  }
  extract_tar_gz(&bytes, &staging)?;
  fs::rename(&staging, source_dir).map_err(ThirdpartyError::io(source_dir))?;

  Ok(true)
}

/// Unpack a `.tar.gz` into `destination`, dropping the first path component
pub fn extract_tar_gz(bytes: &[u8], destination: &Path) -> Result<()> {
  let extract_error = |source| ThirdpartyError::Extract {
    path: destination.to_path_buf(),
    source,
  };

  fs::create_dir_all(destination).map_err(ThirdpartyError::io(destination))?;

  let mut archive = Archive::new(GzDecoder::new(Cursor::new(bytes)));
  for entry in archive.entries().map_err(extract_error)? {
    let mut entry = entry.map_err(extract_error)?;
    let path = entry.path().map_err(extract_error)?.into_owned();

    let Some(relative) = strip_archive_root(&path) else {
      continue;
    };

    let target = destination.join(relative);
    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).map_err(ThirdpartyError::io(parent))?;
    }
    entry.unpack(&target).map_err(extract_error)?;
  }

  Ok(())
}

/// Path below the archive's root folder; `None` for the root itself and for
/// entries that would escape the destination.
fn strip_archive_root(path: &Path) -> Option<PathBuf> {
  let mut components = path.components();
  components.next()?;

  let mut relative = PathBuf::new();
  for component in components {
    match component {
      Component::Normal(part) => relative.push(part),
      Component::CurDir => {}
      _ => return None,
    }
  }

  (!relative.as_os_str().is_empty()).then_some(relative)
}

fn staging_dir(source_dir: &Path) -> PathBuf {
  let mut name = source_dir.file_name().map(OsString::from).unwrap_or_default();
  name.push(".partial");
  source_dir.with_file_name(name)
}
