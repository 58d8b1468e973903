use std::path::{Path, PathBuf};

use crate::error::GeneratorError;
use crate::naming::normalize::camel_to_snake;

/// Folder used when the URL path has fewer than two segments.
pub const DEFAULT_FOLDER: &str = "common";

// ============================================================================
// URL utilities
// ============================================================================

/// Path component of a URL, without scheme, host, query or fragment.
///
/// Inputs without `://` are treated as a bare path.
pub fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    match url.find("://") {
        Some(i) => {
            let after_scheme = i + 3;
            match url[after_scheme..].find('/') {
                Some(slash) => &url[after_scheme + slash..],
                None => "",
            }
        }
        None => url,
    }
}

/// Non-empty `/`-separated segments of the URL path.
pub fn url_segments(url: &str) -> Vec<&str> {
    url_path(url).split('/').filter(|s| !s.is_empty()).collect()
}

/// Grouping folder for a URL: the second-to-last path segment, sanitized,
/// or [`DEFAULT_FOLDER`] when there are fewer than two segments.
pub fn grouping_folder(url: &str) -> String {
    let segments = url_segments(url);
    if segments.len() < 2 {
        return DEFAULT_FOLDER.to_string();
    }
    sanitize_folder(segments[segments.len() - 2])
}

fn sanitize_folder(segment: &str) -> String {
    segment
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// ============================================================================
// Artifact placement
// ============================================================================

/// `LoginPage` + `py` -> `login_page.py`
pub fn artifact_file_name(artifact_name: &str, extension: &str) -> String {
    format!("{}.{}", camel_to_snake(artifact_name), extension)
}

/// Where the artifact for (`artifact_name`, `url`) lives under `root`.
/// Pure; touches nothing on disk.
pub fn artifact_path(root: &Path, artifact_name: &str, url: &str, extension: &str) -> PathBuf {
    root.join(grouping_folder(url))
        .join(artifact_file_name(artifact_name, extension))
}

/// [`artifact_path`] plus creation of the grouping folder and its parents.
pub fn resolve_artifact_path(
    root: &Path,
    artifact_name: &str,
    url: &str,
    extension: &str,
) -> Result<PathBuf, GeneratorError> {
    let path = artifact_path(root, artifact_name, url, extension);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| GeneratorError::io(dir, e))?;
    }
    Ok(path)
}
