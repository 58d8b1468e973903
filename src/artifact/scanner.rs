use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GeneratorError;

use super::manifest::{load_manifest, ArtifactManifest};

// `<indent>self.<name> = page.locator(` with optional `self.` before `page`
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*self\.([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(?:self\.)?page\.locator\(")
        .expect("static regex")
});

/// Where the declared names of an artifact came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// No artifact on disk.
    Absent,
    /// Manifest fingerprint matched the artifact content.
    Manifest,
    /// Manifest was stale; names are the union of manifest and text scan.
    ManifestAndText,
    /// No usable manifest; names come from the text scan only.
    Text,
}

/// Prior state of an artifact as seen before a merge.
#[derive(Debug, Clone)]
pub struct ExistingArtifact {
    /// Full file content, empty when the artifact does not exist.
    pub content: String,
    /// Declared names in first-seen order, without duplicates.
    pub declared: Vec<String>,
    pub source: NameSource,
}

impl ExistingArtifact {
    pub fn absent() -> Self {
        Self {
            content: String::new(),
            declared: Vec::new(),
            source: NameSource::Absent,
        }
    }

    pub fn exists(&self) -> bool {
        self.source != NameSource::Absent
    }

    pub fn declared_set(&self) -> HashSet<String> {
        self.declared.iter().cloned().collect()
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Declared element names of the artifact at `path`; empty if it does not exist.
pub fn scan_declared_names(path: &Path) -> Result<HashSet<String>, GeneratorError> {
    Ok(scan_artifact(path)?.declared_set())
}

/// Read the artifact at `path` and recover its declared names.
///
/// A manifest whose fingerprint matches the content is trusted as-is. A stale
/// manifest (the file was edited by hand) is merged with a text scan so names
/// known to either survive. Without a manifest only the text scan is used.
pub fn scan_artifact(path: &Path) -> Result<ExistingArtifact, GeneratorError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ExistingArtifact::absent()),
        Err(e) => return Err(GeneratorError::io(path, e)),
    };

    let (declared, source) = match load_manifest(path) {
        Some(manifest) if manifest.matches(&content) => {
            (dedup(manifest.declared), NameSource::Manifest)
        }
        Some(manifest) => (
            merge_stale(manifest, scan_declarations(&content)),
            NameSource::ManifestAndText,
        ),
        None => (scan_declarations(&content), NameSource::Text),
    };

    Ok(ExistingArtifact {
        content,
        declared,
        source,
    })
}

/// Line-oriented scan for `self.<name> = page.locator(...)` declarations.
///
/// Tolerates reindented or hand-edited lines that keep this shape; renamed or
/// restructured declarations are not recovered.
pub fn scan_declarations(content: &str) -> Vec<String> {
    dedup(
        content
            .lines()
            .filter_map(declared_name)
            .map(str::to_string)
            .collect(),
    )
}

/// Name declared on `line`, if the line has the declaration shape.
pub fn declared_name(line: &str) -> Option<&str> {
    DECLARATION
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_declaration_line(line: &str) -> bool {
    DECLARATION.is_match(line)
}

fn merge_stale(manifest: ArtifactManifest, scanned: Vec<String>) -> Vec<String> {
    let mut names = manifest.declared;
    names.extend(scanned);
    dedup(names)
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}
