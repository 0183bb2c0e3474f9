use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffixes of files submitted for indexing.
pub const CANDIDATE_SUFFIXES: &[&str] =
    &[".go", ".cpp", ".hpp", ".c", ".h", ".txt"];

/// Whether `path` names a file that should be indexed.
pub fn is_candidate(path: &Path) -> bool {
    let name = path.to_string_lossy();
    CANDIDATE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

/// Recursively walk `root` and return every non-directory entry.
///
/// Entries are returned in lexical order, the same order a depth-first
/// walk visiting sorted directory listings produces. Symlinks are
/// reported as-is and never followed into directories. Subdirectories
/// that cannot be read are logged and skipped.
pub fn discover_paths(root: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::symlink_metadata(root).map_err(|_| Error::NotFound {
        kind: "directory",
        path: root.to_path_buf(),
    })?;

    let mut results = Vec::new();
    if meta.is_dir() {
        walk_dir(root, &mut results)?;
    } else {
        results.push(root.to_path_buf());
    }
    Ok(results)
}

fn walk_dir(current: &Path, results: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(current)?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            if let Err(err) = walk_dir(&path, results) {
                tracing::warn!(
                    path = %path.display(),
                    "skipping unreadable directory: {err}"
                );
            }
        } else {
            results.push(path);
        }
    }

    Ok(())
}

/// Read newline-separated paths from a list file.
///
/// Blank lines are dropped and a trailing `\r` is trimmed from each
/// entry; otherwise entries are used verbatim, in file order.
pub fn read_list(list: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(list).map_err(|err| {
        Error::Config(format!(
            "could not open list file {}: {err}",
            list.display()
        ))
    })?;

    Ok(content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
