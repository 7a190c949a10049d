//! Packing a configuration directory into a tar.gz archive

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use tar::Builder;

use crate::error::{Result, TfeError};

/// Directory names never included in an upload
const IGNORED_NAMES: &[&str] = &[".git", ".terraform"];

/// Pack the contents of `dir` into a gzip-compressed tarball
///
/// Paths in the archive are relative to `dir`. Symlinks are stored as links.
pub fn pack_directory(dir: &Path) -> Result<Vec<u8>> {
    if !dir.is_dir() {
        return Err(TfeError::validation("path needs to be an existing directory"));
    }

    let mut builder = Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    builder.follow_symlinks(false);
    append_entries(&mut builder, dir, Path::new(""))?;

    let bytes = builder.into_inner()?.finish()?;
    debug!("Packed {} into {} bytes", dir.display(), bytes.len());
    Ok(bytes)
}

fn append_entries<W: Write>(builder: &mut Builder<W>, root: &Path, relative: &Path) -> Result<()> {
    let mut entries = fs::read_dir(root.join(relative))?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        if IGNORED_NAMES.iter().any(|ignored| name == *ignored) {
            continue;
        }
        let path = relative.join(&name);
        if entry.file_type()?.is_dir() {
            builder.append_dir(&path, entry.path())?;
            append_entries(builder, root, &path)?;
        } else {
            builder.append_path_with_name(entry.path(), &path)?;
        }
    }
    Ok(())
}
