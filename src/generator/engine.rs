use std::collections::HashSet;
use std::path::PathBuf;

use crate::artifact::manifest::{write_manifest, ArtifactManifest};
use crate::artifact::path::{artifact_path, resolve_artifact_path};
use crate::artifact::scanner::{is_declaration_line, scan_artifact, ExistingArtifact};
use crate::artifact::writer::write_atomic;
use crate::error::GeneratorError;
use crate::extract::element_model::ElementCandidate;
use crate::extract::extractor::extract;
use crate::naming::alias::AliasTable;
use crate::naming::normalize::is_valid_artifact_name;

use super::report::GenerationReport;
use super::template::{
    class_header, declaration_line, GENERIC_MARKER, GENERIC_METHODS, PAGE_BINDING,
};
use super::triggers::{default_triggers, matching, MethodTrigger};

pub const DEFAULT_OUTPUT_DIR: &str = "tests/pages";
pub const DEFAULT_EXTENSION: &str = "py";

// ============================================================================
// Configuration
// ============================================================================

/// Immutable inputs of the generator, fixed at construction.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output_dir: PathBuf,
    pub extension: String,
    pub aliases: AliasTable,
    pub triggers: Vec<MethodTrigger>,
    pub write_manifest: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            aliases: AliasTable::default(),
            triggers: default_triggers(),
            write_manifest: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

// ============================================================================
// Merge plan
// ============================================================================

/// Everything one generation call would add to an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
    /// New declarations, in extraction order.
    pub declarations: Vec<ElementCandidate>,
    pub generic_block: bool,
    /// Triggered method blocks not yet present.
    pub methods: Vec<MethodTrigger>,
}

impl MergePlan {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && !self.generic_block && self.methods.is_empty()
    }
}

/// Decide what to add, given the candidates and the artifact's prior state.
///
/// Names already declared, or repeated earlier in `candidates`, are skipped.
/// `content` is the text the blocks will be checked against (the existing
/// artifact, or the header of a new one).
pub fn plan_merge(
    candidates: &[ElementCandidate],
    declared: &HashSet<String>,
    content: &str,
    url: &str,
    triggers: &[MethodTrigger],
) -> MergePlan {
    let mut seen = declared.clone();
    let declarations = candidates
        .iter()
        .filter(|c| seen.insert(c.name.clone()))
        .cloned()
        .collect();

    let methods = matching(triggers, url)
        .into_iter()
        .filter(|t| !t.is_present_in(content))
        .cloned()
        .collect();

    MergePlan {
        declarations,
        generic_block: !content.contains(GENERIC_MARKER),
        methods,
    }
}

/// Apply `plan` to `content` without touching existing lines.
///
/// Declarations go right after the last existing declaration, or after the
/// page binding (and the blank lines following it) when there is none, and
/// at the end of the file if neither exists. Method blocks are appended.
pub fn apply_plan(content: &str, plan: &MergePlan) -> String {
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }

    if !plan.declarations.is_empty() {
        let at = declaration_anchor(&lines).unwrap_or(lines.len());
        let tail = lines.split_off(at);
        lines.extend(
            plan.declarations
                .iter()
                .map(|c| declaration_line(&c.name, &c.selector)),
        );
        lines.extend(tail);
    }

    let mut out = lines.concat();
    if plan.generic_block {
        out.push_str(GENERIC_METHODS);
    }
    for method in &plan.methods {
        out.push_str(&method.body);
    }
    out
}

/// Line index where new declarations are inserted.
///
/// Only the constructor body counts: from the `def __init__` line (or the
/// page binding) up to the next code line indented no deeper than that
/// `def`. Declarations inside other methods are never used as anchors.
fn declaration_anchor(lines: &[String]) -> Option<usize> {
    let binding = lines.iter().position(|l| l.trim() == PAGE_BINDING);
    let ctor = lines
        .iter()
        .position(|l| l.trim_start().starts_with("def __init__"))
        .filter(|&d| binding.is_none_or(|b| d < b));

    let start = ctor.or(binding)?;
    let def_indent = ctor.map(|d| indent_of(&lines[d])).unwrap_or(4);
    let end = lines[start + 1..]
        .iter()
        .position(|l| {
            let code = l.trim();
            !code.is_empty() && !code.starts_with('#') && indent_of(l) <= def_indent
        })
        .map(|i| start + 1 + i)
        .unwrap_or(lines.len());

    if let Some(i) = lines[start..end].iter().rposition(|l| is_declaration_line(l)) {
        return Some(start + i + 1);
    }

    let mut at = binding.filter(|&b| b < end).unwrap_or(start) + 1;
    while at < end && lines[at].trim().is_empty() {
        at += 1;
    }
    Some(at)
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

// ============================================================================
// Generator
// ============================================================================

/// Generates page-object artifacts from rendered HTML and merges new elements
/// into artifacts that already exist.
#[derive(Debug, Clone, Default)]
pub struct PomGenerator {
    config: GeneratorConfig,
}

impl PomGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn extract(&self, html: &str) -> Vec<ElementCandidate> {
        extract(html, &self.config.aliases)
    }

    /// Artifact location for (`artifact_name`, `url`), without creating it.
    pub fn artifact_path(&self, artifact_name: &str, url: &str) -> PathBuf {
        artifact_path(&self.config.output_dir, artifact_name, url, &self.config.extension)
    }

    /// Extract elements from `html` and merge them into the artifact for
    /// (`artifact_name`, `url`), creating it if needed.
    ///
    /// Writes only when something new is added. Filesystem failures are
    /// returned as [`GeneratorError::Io`].
    pub fn generate(
        &self,
        html: &str,
        artifact_name: &str,
        url: &str,
    ) -> Result<GenerationReport, GeneratorError> {
        self.generate_from_candidates(&self.extract(html), artifact_name, url)
    }

    /// Merge already extracted `candidates`, as [`Self::generate`] does.
    pub fn generate_from_candidates(
        &self,
        candidates: &[ElementCandidate],
        artifact_name: &str,
        url: &str,
    ) -> Result<GenerationReport, GeneratorError> {
        if !is_valid_artifact_name(artifact_name) {
            return Err(GeneratorError::InvalidArtifactName(artifact_name.to_string()));
        }

        let path = resolve_artifact_path(
            &self.config.output_dir,
            artifact_name,
            url,
            &self.config.extension,
        )?;
        let existing = scan_artifact(&path)?;

        let base = if existing.exists() {
            existing.content.clone()
        } else {
            class_header(artifact_name)
        };

        let plan = plan_merge(
            candidates,
            &existing.declared_set(),
            &base,
            url,
            &self.config.triggers,
        );

        if existing.exists() && plan.is_empty() {
            return Ok(GenerationReport::unchanged(artifact_name, path));
        }

        let content = apply_plan(&base, &plan);
        write_atomic(&path, &content)?;

        if self.config.write_manifest {
            let manifest = ArtifactManifest::new(
                artifact_name,
                declared_after(&existing, &plan),
                &content,
            );
            write_manifest(&path, &manifest)?;
        }

        Ok(GenerationReport {
            artifact_name: artifact_name.to_string(),
            path,
            created: !existing.exists(),
            added_elements: plan.declarations.iter().map(|c| c.name.clone()).collect(),
            added_generic_block: plan.generic_block,
            added_methods: plan.methods.iter().map(|m| m.name.clone()).collect(),
        })
    }

    /// Declared names of the artifact for (`artifact_name`, `url`).
    pub fn declared_names(&self, artifact_name: &str, url: &str) -> Result<Vec<String>, GeneratorError> {
        Ok(scan_artifact(&self.artifact_path(artifact_name, url))?.declared)
    }
}

fn declared_after(existing: &ExistingArtifact, plan: &MergePlan) -> Vec<String> {
    existing
        .declared
        .iter()
        .cloned()
        .chain(plan.declarations.iter().map(|c| c.name.clone()))
        .collect()
}
