use std::fs;

use clap::Parser;
use pom_generator::cli::commands::{artifact_name_for, cmd_generate, cmd_resolve, cmd_scan};
use pom_generator::cli::config::{build_generator_config, load_config, AppConfig, Cli, Commands};
use pom_generator::error::GeneratorError;
use tempfile::TempDir;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_generate_minimal() {
    let cli = Cli::parse_from([
        "pom-generator",
        "generate",
        "--html",
        "page.html",
        "--url",
        "https://example.com/login",
    ]);
    match cli.command {
        Commands::Generate {
            html,
            url,
            name,
            output_dir,
            no_manifest,
            trace,
        } => {
            assert_eq!(html, "page.html");
            assert_eq!(url, "https://example.com/login");
            assert_eq!(name, None);
            assert_eq!(output_dir, None);
            assert!(!no_manifest);
            assert_eq!(trace, None);
        }
        _ => panic!("Expected Generate command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_generate_all_args() {
    let cli = Cli::parse_from([
        "pom-generator",
        "-vv",
        "generate",
        "--html",
        "-",
        "--url",
        "https://example.com/secure",
        "--name",
        "SecurePage",
        "-o",
        "out",
        "--no-manifest",
        "--trace",
        "trace.jsonl",
        "--config",
        "custom.yaml",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    match cli.command {
        Commands::Generate {
            html,
            name,
            output_dir,
            no_manifest,
            trace,
            ..
        } => {
            assert_eq!(html, "-");
            assert_eq!(name.as_deref(), Some("SecurePage"));
            assert_eq!(output_dir.as_deref(), Some("out"));
            assert!(no_manifest);
            assert_eq!(trace.as_deref(), Some("trace.jsonl"));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn cli_parse_scan_and_resolve() {
    let cli = Cli::parse_from(["pom-generator", "scan", "--path", "tests/pages/common/login_page.py"]);
    assert!(matches!(cli.command, Commands::Scan { ref path } if path.ends_with("login_page.py")));

    let cli = Cli::parse_from(["pom-generator", "resolve", "--url", "https://x.test/a/b"]);
    match cli.command {
        Commands::Resolve { url, name, output_dir } => {
            assert_eq!(url, "https://x.test/a/b");
            assert!(name.is_none());
            assert!(output_dir.is_none());
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn cli_generate_requires_url() {
    assert!(Cli::try_parse_from(["pom-generator", "generate", "--html", "x.html"]).is_err());
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
fn config_missing_default_file_gives_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.output_dir, "tests/pages");
    assert_eq!(config.extension, "py");
    assert!(config.manifest);
}

#[test]
fn config_explicit_missing_file_is_an_error() {
    let err = load_config(Some("/nonexistent/pom-generator.yaml")).unwrap_err();
    assert!(matches!(err, GeneratorError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/pom-generator.yaml"));
}

#[test]
fn config_unreadable_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(load_config(tmp.path().to_str()).is_err());
}

#[test]
fn config_empty_file_gives_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.yaml");
    fs::write(&path, "\n").unwrap();
    assert_eq!(load_config(path.to_str()).unwrap(), AppConfig::default());
}

#[test]
fn config_partial_file_fills_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("partial.yaml");
    fs::write(&path, "output_dir: generated/pages\n").unwrap();

    let config = load_config(path.to_str()).unwrap();
    assert_eq!(config.output_dir, "generated/pages");
    assert_eq!(config.extension, "py");
    assert!(config.aliases.is_empty());
    assert!(config.manifest);
}

#[test]
fn config_full_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("full.yaml");
    fs::write(
        &path,
        r#"
output_dir: out/pages
extension: .py
manifest: false
aliases:
  "≡": menu_button
methods:
  - url_contains: /search
    name: search_for
    body: "\n    def search_for(self, term):\n        self.fill_input('q', term)\n"
"#,
    )
    .unwrap();

    let config = load_config(path.to_str()).unwrap();
    assert!(!config.manifest);
    assert_eq!(config.aliases.get("≡").map(String::as_str), Some("menu_button"));
    assert_eq!(config.methods.len(), 1);
    assert_eq!(config.methods[0].name, "search_for");
    assert!(config.methods[0].body.contains("def search_for(self, term):"));

    let generator_config = build_generator_config(&config, None, false);
    assert_eq!(generator_config.output_dir, std::path::PathBuf::from("out/pages"));
    assert_eq!(generator_config.extension, "py");
    assert!(!generator_config.write_manifest);
    assert_eq!(generator_config.aliases.resolve("≡"), Some("menu_button"));
    assert_eq!(generator_config.aliases.resolve("×"), Some("close_button"));
    let trigger_names: Vec<&str> = generator_config.triggers.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(trigger_names, vec!["do_login", "logout", "search_for"]);
}

#[test]
fn config_malformed_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.yaml");
    fs::write(&path, "manifest: [not, a, bool]\n").unwrap();
    assert!(load_config(path.to_str()).is_err());
}

#[test]
fn cli_flags_override_config() {
    let config = AppConfig::default();
    let generator_config = build_generator_config(&config, Some("elsewhere"), true);
    assert_eq!(generator_config.output_dir, std::path::PathBuf::from("elsewhere"));
    assert!(!generator_config.write_manifest);
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn artifact_name_defaults_to_url_derived() {
    assert_eq!(artifact_name_for(None, "https://x.test/users/list"), "UsersListPage");
    assert_eq!(artifact_name_for(Some("  "), "https://x.test/login"), "LoginPage");
    assert_eq!(artifact_name_for(Some("Checkout"), "https://x.test/login"), "Checkout");
}

#[test]
fn resolve_command_prints_planned_path() {
    let tmp = TempDir::new().unwrap();
    let config = build_generator_config(&AppConfig::default(), tmp.path().to_str(), false);

    let path = cmd_resolve("https://x.test/secure/logout", Some("LogoutPage"), config);
    assert_eq!(path, tmp.path().join("secure").join("logout_page.py"));
    assert!(!path.exists());
}

#[test]
fn generate_command_writes_artifact_and_trace() {
    let tmp = TempDir::new().unwrap();
    let html_path = tmp.path().join("login.html");
    fs::write(&html_path, r#"<input id="username"><button>Login</button>"#).unwrap();
    let trace_path = tmp.path().join("trace.jsonl");
    let out = tmp.path().join("pages");
    let config = build_generator_config(&AppConfig::default(), out.to_str(), false);

    let report = cmd_generate(
        html_path.to_str().unwrap(),
        "https://x.test/login",
        None,
        config,
        trace_path.to_str(),
        0,
    )
    .unwrap();

    assert_eq!(report.artifact_name, "LoginPage");
    assert_eq!(report.path, out.join("common").join("login_page.py"));
    assert_eq!(report.added_elements, vec!["username", "login_button"]);

    let trace = fs::read_to_string(&trace_path).unwrap();
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(event["outcome"], "updated");
    assert_eq!(event["candidates"], 2);
    assert_eq!(event["artifact_name"], "LoginPage");
    assert_eq!(event["added_methods"][0], "do_login");

    let names = cmd_scan(report.path.to_str().unwrap()).unwrap();
    assert_eq!(names, vec!["username", "login_button"]);
}

#[test]
fn generate_command_traces_failures() {
    let tmp = TempDir::new().unwrap();
    let html_path = tmp.path().join("page.html");
    fs::write(&html_path, "<input id='q'>").unwrap();
    let trace_path = tmp.path().join("trace.jsonl");
    let config = build_generator_config(&AppConfig::default(), tmp.path().to_str(), false);

    let result = cmd_generate(
        html_path.to_str().unwrap(),
        "https://x.test/login",
        Some("Bad.Name"),
        config,
        trace_path.to_str(),
        0,
    );
    assert!(result.is_err());

    let event: serde_json::Value =
        serde_json::from_str(fs::read_to_string(&trace_path).unwrap().trim()).unwrap();
    assert_eq!(event["outcome"], "failed");
    assert!(event["error"].as_str().unwrap().contains("Bad.Name"));
}

#[test]
fn generate_command_missing_html_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config = build_generator_config(&AppConfig::default(), tmp.path().to_str(), false);
    let missing = tmp.path().join("missing.html");
    assert!(cmd_generate(missing.to_str().unwrap(), "https://x.test/", None, config, None, 0).is_err());
}
