//! Serialization and output of the merged document

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{MergeError, MergeErrorKind, MergeResult};

/// Serialize with `indent` spaces per level, `": "` after keys, no trailing newline.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T, indent: u8) -> MergeResult<String> {
    let indent = " ".repeat(indent as usize);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| MergeError::operation(MergeErrorKind::io(e.to_string(), None)))?;

    // serde_json only emits valid UTF-8
    String::from_utf8(buffer)
        .map_err(|e| MergeError::operation(MergeErrorKind::io(e.to_string(), None)))
}

/// Write `content` to `path`, replacing any existing file. The parent directory
/// must already exist.
///
/// With `atomic` the bytes go to a temporary file beside the target which is then
/// renamed over it, so readers see either the old or the new document.
pub fn write_output(path: &Path, content: &str, atomic: bool) -> MergeResult<u64> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if !parent.is_dir() {
        return Err(MergeError::operation(MergeErrorKind::io(
            format!("output directory does not exist: {}", parent.display()),
            Some(path.to_path_buf()),
        )));
    }

    if atomic {
        write_atomic(parent, path, content)?;
    } else {
        fs::write(path, content).map_err(|e| MergeError::write_failed(e, path))?;
    }

    Ok(content.len() as u64)
}

fn write_atomic(parent: &Path, path: &Path, content: &str) -> MergeResult<()> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".jsonmerge");
    // tempfile defaults to 0600; a fresh document gets what `File::create` would
    // give it, 0666 less the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(parent)
        .map_err(|e| MergeError::write_failed(e, path))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| MergeError::write_failed(e, path))?;

    // Keep the mode of a document we are replacing.
    if let Ok(existing) = fs::metadata(path) {
        fs::set_permissions(tmp.path(), existing.permissions())
            .map_err(|e| MergeError::write_failed(e, path))?;
    }

    tmp.persist(path)
        .map_err(|e| MergeError::write_failed(e.error, path))?;
    Ok(())
}
