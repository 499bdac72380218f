use crate::descriptor::FileDescriptor;
use crate::error::Error;
use glob::Pattern;
use std::io;
use std::path::Path;
use tracing::{debug, error, warn};
use walkdir::{DirEntry, WalkDir};

/// Enumerate the files under `root`. Flat mode lists direct children only;
/// recursive mode descends every sub-directory. Directories are never returned.
///
/// Fails only when `root` is missing or not a directory. Unreadable entries
/// below the root are logged and skipped.
pub fn scan(
    root: &Path,
    recursive: bool,
    ignore_globs: &[String],
) -> Result<Vec<FileDescriptor>, Error> {
    if !root.is_dir() {
        return Err(Error::DirectoryNotFound(root.to_path_buf()));
    }

    let ignore_patterns: Vec<Pattern> = ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, &ignore_patterns));

    let mut files = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(err.into());
                }
                let kind = err.io_error().map(io::Error::kind);
                if kind == Some(io::ErrorKind::PermissionDenied) {
                    error!("Access denied reading {:?}: {}", err.path(), err);
                } else {
                    warn!("Skipping unreadable entry {:?}: {}", err.path(), err);
                }
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_dir() || !path.is_file() {
            continue;
        }

        match FileDescriptor::from_path(path) {
            Some(descriptor) => files.push(descriptor),
            None => warn!("Skipping file with non UTF-8 name: {}", path.display()),
        }
    }

    debug!("Scanned {} files under {}", files.len(), root.display());
    Ok(files)
}

fn is_ignored(entry: &DirEntry, patterns: &[Pattern]) -> bool {
    let name = entry.file_name().to_string_lossy();
    patterns
        .iter()
        .any(|pattern| pattern.matches(&name) || pattern.matches_path(entry.path()))
}
