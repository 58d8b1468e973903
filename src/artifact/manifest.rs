use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

use super::writer::write_atomic;

/// Sidecar record of what the generator declared in an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub artifact_name: String,
    /// Element names in declaration order.
    pub declared: Vec<String>,
    /// SHA-1 of the artifact content at the time the manifest was written.
    pub fingerprint: String,
}

impl ArtifactManifest {
    pub fn new(artifact_name: impl Into<String>, declared: Vec<String>, content: &str) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            declared,
            fingerprint: fingerprint(content),
        }
    }

    /// True when `content` is exactly what this manifest was written for.
    pub fn matches(&self, content: &str) -> bool {
        self.fingerprint == fingerprint(content)
    }
}

/// `tests/pages/common/login_page.py` -> `tests/pages/common/login_page.manifest.json`
pub fn manifest_path(artifact_path: &Path) -> PathBuf {
    artifact_path.with_extension("manifest.json")
}

pub fn fingerprint(content: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Load the manifest next to `artifact_path`.
///
/// Missing, unreadable or malformed manifests all yield `None`; the caller
/// falls back to scanning the artifact text.
pub fn load_manifest(artifact_path: &Path) -> Option<ArtifactManifest> {
    let content = std::fs::read_to_string(manifest_path(artifact_path)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_manifest(artifact_path: &Path, manifest: &ArtifactManifest) -> Result<(), GeneratorError> {
    let path = manifest_path(artifact_path);
    let json = serde_json::to_string_pretty(manifest).map_err(|e| GeneratorError::Manifest {
        path: path.clone(),
        source: e,
    })?;
    write_atomic(&path, &(json + "\n"))
}
