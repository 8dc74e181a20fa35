use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal directory-traversal failure. The first error encountered aborts the
/// whole walk; there is no partial recovery.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-file copy failure. Isolated to the one file; sibling copies proceed.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("failed to read source file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write destination file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Recursively visit `root` and every entry reachable beneath it, invoking
/// the callback with each entry's full path.
///
/// The callback sees directories as well as files; callers filter by
/// extension, which directories never match. The walk aborts on the first
/// listing failure.
pub fn walk_tree<F>(root: &Path, on_entry: &mut F) -> Result<(), WalkError>
where
    F: FnMut(&Path),
{
    let metadata = fs::symlink_metadata(root).map_err(|source| WalkError::Metadata {
        path: root.to_path_buf(),
        source,
    })?;

    on_entry(root);

    if metadata.is_dir() {
        let entries = fs::read_dir(root).map_err(|source| WalkError::ReadDir {
            path: root.to_path_buf(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| WalkError::ReadDir {
                path: root.to_path_buf(),
                source,
            })?;
            walk_tree(&entry.path(), on_entry)?;
        }
    }

    Ok(())
}

/// Copy `src` into `dest_root` under its base name, renaming on collision.
///
/// The whole file is read into memory and written to the resolved destination
/// with `rw-r--r--` permissions. The destination is opened create-exclusive,
/// so concurrent copies racing for the same name can never clobber each
/// other: an occupied candidate is retried as `<stem>_copy_<unixSeconds><ext>`
/// and then `<stem>_copy_<unixSeconds>_<n><ext>` until a free name is found.
/// Returns the path actually written.
pub fn copy_file(src: &Path, dest_root: &Path) -> Result<PathBuf, CopyError> {
    let contents = fs::read(src).map_err(|source| CopyError::Read {
        path: src.to_path_buf(),
        source,
    })?;

    let base_name = src.file_name().unwrap_or_else(|| src.as_os_str());
    let candidate = dest_root.join(base_name);
    let timestamp = Utc::now().timestamp();

    let mut target = candidate.clone();
    let mut attempt = 0u32;
    loop {
        match create_exclusive(&target) {
            Ok(mut file) => {
                file.write_all(&contents).map_err(|source| CopyError::Write {
                    path: target.clone(),
                    source,
                })?;
                return Ok(target);
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                target = collision_variant(&candidate, timestamp, attempt);
                attempt += 1;
            }
            Err(source) => {
                return Err(CopyError::Write {
                    path: target,
                    source,
                })
            }
        }
    }
}

/// Open a destination file for writing, failing if it already exists.
fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// Timestamp-suffixed rename of an occupied candidate path.
///
/// Only the trailing extension is stripped and re-appended; occurrences of
/// the extension text elsewhere in the file name are left alone. `attempt`
/// disambiguates collisions resolved within the same clock second.
fn collision_variant(candidate: &Path, timestamp: i64, attempt: u32) -> PathBuf {
    let stem = candidate
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let ext = candidate
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let name = if attempt == 0 {
        format!("{stem}_copy_{timestamp}{ext}")
    } else {
        format!("{stem}_copy_{timestamp}_{attempt}{ext}")
    };
    candidate.with_file_name(name)
}
