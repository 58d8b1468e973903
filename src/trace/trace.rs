use serde::Serialize;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::generator::report::GenerationReport;

/// One JSONL record per generation call.
#[derive(Debug, Serialize)]
pub struct GenerationEvent {
    pub timestamp_ms: u128,

    pub artifact_name: String,
    pub url: String,
    pub path: Option<PathBuf>,

    pub outcome: String,
    pub candidates: usize,

    pub added_elements: Vec<String>,
    pub added_methods: Vec<String>,
    pub generic_block_added: bool,

    pub error: Option<String>,
}

impl GenerationEvent {
    pub fn now(artifact_name: &str, url: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            artifact_name: artifact_name.to_string(),
            url: url.to_string(),
            path: None,
            outcome: "pending".to_string(),
            candidates: 0,
            added_elements: vec![],
            added_methods: vec![],
            generic_block_added: false,
            error: None,
        }
    }

    pub fn with_candidates(mut self, count: usize) -> Self {
        self.candidates = count;
        self
    }

    pub fn with_report(mut self, report: &GenerationReport) -> Self {
        self.path = Some(report.path.clone());
        self.outcome = report.outcome().to_string();
        self.added_elements = report.added_elements.clone();
        self.added_methods = report.added_methods.clone();
        self.generic_block_added = report.added_generic_block;
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.outcome = "failed".to_string();
        self.error = Some(error.to_string());
        self
    }
}
