use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::generator::engine::{GeneratorConfig, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR};
use crate::generator::triggers::{default_triggers, MethodTrigger};
use crate::naming::alias::AliasTable;

pub const DEFAULT_CONFIG_FILE: &str = "pom-generator.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "pom-generator",
    version,
    about = "Generate and incrementally update page objects from rendered HTML"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: pom-generator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract elements from an HTML snapshot and merge them into its page object
    Generate {
        /// HTML file to read, or `-` for stdin
        #[arg(long)]
        html: String,

        /// Resolved URL the HTML was rendered from
        #[arg(long)]
        url: String,

        /// Page object class name (default: derived from the URL)
        #[arg(long)]
        name: Option<String>,

        /// Root directory for generated page objects
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Do not write the sidecar manifest
        #[arg(long)]
        no_manifest: bool,

        /// Append a JSONL trace event to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// Print the element names declared in an existing page object
    Scan {
        /// Page object file
        #[arg(long)]
        path: String,
    },

    /// Print where the page object for a URL would be written
    Resolve {
        #[arg(long)]
        url: String,

        /// Page object class name (default: derived from the URL)
        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        output_dir: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `pom-generator.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_extension")]
    pub extension: String,

    /// Extra glyph aliases, merged over the built-in table.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Extra URL-triggered methods, appended after the built-in ones.
    #[serde(default)]
    pub methods: Vec<MethodTrigger>,

    #[serde(default = "default_true")]
    pub manifest: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            extension: default_extension(),
            aliases: BTreeMap::new(),
            methods: Vec::new(),
            manifest: true,
        }
    }
}

// Serde default helpers
fn default_output_dir() -> String { DEFAULT_OUTPUT_DIR.to_string() }
fn default_extension() -> String { DEFAULT_EXTENSION.to_string() }
fn default_true() -> bool { true }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file.
///
/// A missing or empty file yields defaults; a file that exists but does not
/// parse is an error.
/// Load the YAML config at `path`, or the default file in the working directory.
///
/// Only an absent default file falls back to built-in defaults; an explicit
/// path that cannot be read is an error.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, GeneratorError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(e) => return Err(GeneratorError::io(config_path, e)),
    };

    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| GeneratorError::Config {
        path: config_path.to_string(),
        source: e,
    })
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build the engine config: CLI flags override the file, which overrides defaults.
pub fn build_generator_config(
    config: &AppConfig,
    output_dir: Option<&str>,
    no_manifest: bool,
) -> GeneratorConfig {
    let mut triggers = default_triggers();
    triggers.extend(config.methods.iter().cloned());

    GeneratorConfig {
        output_dir: PathBuf::from(output_dir.unwrap_or(config.output_dir.as_str())),
        extension: config.extension.trim_start_matches('.').to_string(),
        aliases: AliasTable::default().with_entries(config.aliases.clone()),
        triggers,
        write_manifest: config.manifest && !no_manifest,
    }
}
