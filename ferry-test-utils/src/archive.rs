//! In-memory source archives

use std::io::Write;

use anyhow::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, Header};

/// Builds a gzip-compressed tarball whose entries all live under one root
/// directory, the way upstream source releases are packed.
pub struct TarballBuilder {
  root: String,
  files: Vec<(String, Vec<u8>)>,
}

impl TarballBuilder {
  pub fn new(root: &str) -> Self {
    Self {
      root: root.to_string(),
      files: Vec::new(),
    }
  }

  /// Add a file at `path` relative to the archive root
  pub fn file(mut self, path: &str, contents: &str) -> Self {
    self.files.push((path.to_string(), contents.as_bytes().to_vec()));
    self
  }

  pub fn build(self) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = Builder::new(encoder);

    let mut dir_header = Header::new_gnu();
    dir_header.set_entry_type(tar::EntryType::Directory);
    dir_header.set_mode(0o755);
    dir_header.set_size(0);
    dir_header.set_cksum();
    builder.append_data(&mut dir_header, format!("{}/", self.root), std::io::empty())?;

    for (path, contents) in &self.files {
      let mut header = Header::new_gnu();
      header.set_mode(0o644);
      header.set_size(contents.len() as u64);
      header.set_cksum();
      builder.append_data(&mut header, format!("{}/{}", self.root, path), contents.as_slice())?;
    }

    let mut encoder = builder.into_inner()?;
    encoder.flush()?;
    Ok(encoder.finish()?)
  }
}

/// A small stand-in for the Lua 5.3.3 source release
pub fn lua_source_tarball() -> Result<Vec<u8>> {
  TarballBuilder::new("lua-5.3.3")
    .file("Makefile", "all:\n\tcd src && $(MAKE)\n")
    .file("README", "This is Lua 5.3.3\n")
    .file("src/lua.h", "#define LUA_VERSION_MAJOR \"5\"\n")
    .file("src/luaconf.h", "#define LUA_COMPAT_5_2\n")
    .file("src/lualib.h", "#define LUA_COLIBNAME \"coroutine\"\n")
    .file("src/lapi.c", "#include \"lua.h\"\n")
    .file("src/lua.c", "int main(void) { return 0; }\n")
    .build()
}
