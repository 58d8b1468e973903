use std::io::Read;
use std::path::PathBuf;

use crate::artifact::scanner::scan_artifact;
use crate::generator::engine::{GeneratorConfig, PomGenerator};
use crate::generator::report::GenerationReport;
use crate::naming::normalize::class_name_from_url;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::GenerationEvent;

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    html_source: &str,
    url: &str,
    name: Option<&str>,
    config: GeneratorConfig,
    trace: Option<&str>,
    verbose: u8,
) -> Result<GenerationReport, Box<dyn std::error::Error>> {
    let html = read_html(html_source)?;
    let artifact_name = artifact_name_for(name, url);
    let generator = PomGenerator::new(config);
    let tracer = trace.map(TraceLogger::new).unwrap_or_else(TraceLogger::disabled);

    let candidates = generator.extract(&html);
    if verbose > 0 {
        eprintln!(
            "Generating {} from {} ({} candidates)...",
            artifact_name,
            url,
            candidates.len()
        );
    }
    if verbose > 1 {
        for c in &candidates {
            eprintln!("  {:?} {} -> {}", c.kind, c.name, c.selector);
        }
    }

    let event = GenerationEvent::now(&artifact_name, url).with_candidates(candidates.len());
    let report = match generator.generate_from_candidates(&candidates, &artifact_name, url) {
        Ok(report) => report,
        Err(e) => {
            tracer.log(&event.with_error(&e));
            return Err(e.into());
        }
    };
    tracer.log(&event.with_report(&report));

    println!("{}", report.status_line());
    if verbose > 0 && report.is_updated() {
        for name in &report.added_elements {
            eprintln!("  + {}", name);
        }
    }

    Ok(report)
}

/// Read HTML from a file, or from stdin when `source` is `-`.
pub fn read_html(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut html = String::new();
        std::io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        std::fs::read_to_string(source)
    }
}

// ============================================================================
// scan subcommand
// ============================================================================

pub fn cmd_scan(path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let existing = scan_artifact(std::path::Path::new(path))?;
    if !existing.exists() {
        eprintln!("No page object at: {}", path);
    }
    for name in &existing.declared {
        println!("{}", name);
    }
    Ok(existing.declared)
}

// ============================================================================
// resolve subcommand
// ============================================================================

pub fn cmd_resolve(url: &str, name: Option<&str>, config: GeneratorConfig) -> PathBuf {
    let artifact_name = artifact_name_for(name, url);
    let path = PomGenerator::new(config).artifact_path(&artifact_name, url);
    println!("{}", path.display());
    path
}

// ============================================================================
// Helpers
// ============================================================================

/// Explicit name if given, else one derived from the URL path.
pub fn artifact_name_for(name: Option<&str>, url: &str) -> String {
    match name {
        Some(n) if !n.trim().is_empty() => n.trim().to_string(),
        _ => class_name_from_url(url),
    }
}
