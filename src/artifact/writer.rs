use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::GeneratorError;

/// Replace the file at `path` with `content` in one rename.
///
/// The content goes to a temp file in the same directory first, so a failed
/// or interrupted write leaves the previous file untouched and no partial
/// temp file behind. An existing file keeps its permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| GeneratorError::io(dir, e))?;
    let permissions = std::fs::metadata(path)
        .map(|m| m.permissions())
        .ok()
        .or_else(new_file_permissions);

    tmp.write_all(content.as_bytes())
        .and_then(|_| match permissions {
            Some(p) => tmp.as_file().set_permissions(p),
            None => Ok(()),
        })
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| GeneratorError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| GeneratorError::io(path, e.error))?;
    Ok(())
}

// Temp files start as 0600; generated sources should be readable like any other.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
