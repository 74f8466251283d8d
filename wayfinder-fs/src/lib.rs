//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Artifact loading and the CLI both validate and open UTF-8 paths through
//! these helpers so ambient authority is requested in one place.

#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Propagates the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve an ambient directory for `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or the parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether a path exists and is a regular file using capability-based IO.
///
/// # Errors
/// Propagates I/O errors other than the metadata lookup itself succeeding.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Ensure the parent directory for `path` exists.
///
/// Absolute parents are created relative to the filesystem root; relative
/// parents are created under the current directory.
///
/// # Errors
/// Propagates directory-open and creation failures.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base, relative) = if parent.is_absolute() {
        let relative = parent
            .strip_prefix("/")
            .map_err(|_| io::Error::other("failed to strip root from absolute path"))?;
        (Utf8PathBuf::from("/"), relative.to_path_buf())
    } else {
        (Utf8PathBuf::from("."), parent.to_path_buf())
    };
    if relative.as_str().is_empty() {
        return Ok(());
    }

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    dir.create_dir_all(&relative)?;
    Ok(())
}
