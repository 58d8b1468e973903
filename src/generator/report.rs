use std::path::PathBuf;

use serde::Serialize;

/// What a single generation call did to its artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub artifact_name: String,
    pub path: PathBuf,
    /// The artifact did not exist before this call.
    pub created: bool,
    pub added_elements: Vec<String>,
    pub added_generic_block: bool,
    pub added_methods: Vec<String>,
}

impl GenerationReport {
    pub fn unchanged(artifact_name: impl Into<String>, path: PathBuf) -> Self {
        Self {
            artifact_name: artifact_name.into(),
            path,
            created: false,
            added_elements: vec![],
            added_generic_block: false,
            added_methods: vec![],
        }
    }

    /// True when anything was written to the artifact.
    pub fn is_updated(&self) -> bool {
        self.created
            || !self.added_elements.is_empty()
            || self.added_generic_block
            || !self.added_methods.is_empty()
    }

    pub fn outcome(&self) -> &'static str {
        if self.is_updated() { "updated" } else { "unchanged" }
    }

    pub fn status_line(&self) -> String {
        if !self.is_updated() {
            return format!("⚡ No changes detected in {}", self.artifact_name);
        }

        let mut details = vec![format!("+{} elements", self.added_elements.len())];
        if self.added_generic_block {
            details.push("generic methods".to_string());
        }
        if !self.added_methods.is_empty() {
            details.push(format!("methods: {}", self.added_methods.join(", ")));
        }

        format!(
            "✅ {} updated in {} ({})",
            self.artifact_name,
            self.path.display(),
            details.join(", ")
        )
    }
}
