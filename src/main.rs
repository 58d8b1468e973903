use clap::Parser;
use pom_generator::cli::commands::{cmd_generate, cmd_resolve, cmd_scan};
use pom_generator::cli::config::{build_generator_config, load_config, Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            html,
            url,
            name,
            output_dir,
            no_manifest,
            trace,
        } => {
            let generator_config = build_generator_config(&config, output_dir.as_deref(), no_manifest);
            cmd_generate(
                &html,
                &url,
                name.as_deref(),
                generator_config,
                trace.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Scan { path } => {
            cmd_scan(&path)?;
        }
        Commands::Resolve {
            url,
            name,
            output_dir,
        } => {
            let generator_config = build_generator_config(&config, output_dir.as_deref(), false);
            cmd_resolve(&url, name.as_deref(), generator_config);
        }
    }

    Ok(())
}
