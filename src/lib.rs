//! Page-object generator.
//!
//! Turns the rendered HTML of a page into a page-object source file with one
//! locator per input, button and link, and merges newly seen elements into
//! that file on later runs without touching what is already there.

use crate::{
    error::GeneratorError,
    generator::{
        engine::{GeneratorConfig, PomGenerator},
        report::GenerationReport,
    },
};

pub mod artifact;
pub mod cli;
pub mod error;
pub mod extract;
pub mod generator;
pub mod naming;
pub mod trace;

/// Generate or update the page object for one page observation using the
/// default configuration (`tests/pages`, built-in aliases and methods).
pub fn generate(html: &str, artifact_name: &str, url: &str) -> Result<GenerationReport, GeneratorError> {
    PomGenerator::new(GeneratorConfig::default()).generate(html, artifact_name, url)
}
