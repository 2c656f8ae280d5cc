use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MergeError, MergeErrorKind, MergeResult};

/// Find `.json` files in the top level of `dir`. Subdirectories are not entered.
///
/// The result follows `read_dir` order unless `sort` is set, in which case it is
/// ordered by file name.
pub fn find_json_files(dir: &Path, sort: bool) -> MergeResult<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut json_files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| MergeError::from_io(e, dir))? {
        let entry = entry.map_err(|e| MergeError::from_io(e, dir))?;
        let path = entry.path();
        if crate::parser::filter::is_json_file(&path) {
            json_files.push(path);
        }
    }

    if sort {
        json_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }

    Ok(json_files)
}

/// Fail with NotFound / PermissionDenied / NotADirectory before any work starts.
pub fn ensure_directory(dir: &Path) -> MergeResult<()> {
    let metadata = fs::metadata(dir).map_err(|e| MergeError::from_io(e, dir))?;
    if !metadata.is_dir() {
        return Err(MergeError::operation(MergeErrorKind::not_a_directory(dir)));
    }
    Ok(())
}
