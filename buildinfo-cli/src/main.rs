mod output;

use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use buildinfo_core::config::{CliOverrides, OutputFormat, ReportConfig};
use buildinfo_core::error::BuildInfoError;
use buildinfo_core::{properties, VersionReport};

#[derive(Parser)]
#[command(
    name = "rocksdb-buildinfo",
    about = "Report the build provenance of this storage-engine build",
    version,
    propagate_version = true
)]
struct Cli {
    /// Config file path
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<String>,

    /// Program name shown in version output (overrides config)
    #[arg(long, value_name = "NAME", global = true)]
    program: Option<String>,

    /// Output format: text, json, table (overrides config)
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<String>,

    /// Output results as JSON (same as --format json)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version and build provenance
    Version {
        /// Include every build property
        #[arg(short, long)]
        full: bool,
    },

    /// List all build properties
    Properties,

    /// Print a single build property
    Property {
        /// Property name, e.g. rocksdb_build_git_sha
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging (suppress when JSON output is requested)
    let filter = if cli.json || cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_target(false)
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(exit_code(&e));
    }
}

/// Map error types to differentiated exit codes.
fn exit_code(error: &BuildInfoError) -> i32 {
    match error {
        BuildInfoError::ConfigError(_) => 2,
        BuildInfoError::UnknownProperty { .. } => 3,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<(), BuildInfoError> {
    let format = if cli.json {
        Some(OutputFormat::Json)
    } else {
        cli.format.as_deref().map(str::parse::<OutputFormat>).transpose()?
    };

    let overrides = CliOverrides {
        program: cli.program,
        verbose: match &cli.command {
            Commands::Version { full: true } => Some(true),
            _ => None,
        },
        format,
    };

    let config = ReportConfig::load(cli.config.as_deref(), &overrides)?;
    log::debug!("Report config: {:?}", config);

    match cli.command {
        Commands::Version { .. } => {
            let report = VersionReport::new(&config);
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Table => output::print_version_table(&report),
                OutputFormat::Text => output::print_version_text(&report),
            }
        }
        Commands::Properties => {
            let props = properties::build_properties();
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&props)?),
                OutputFormat::Table | OutputFormat::Text => output::print_properties_table(&props),
            }
        }
        Commands::Property { name } => {
            let value = properties::property(&name)?;
            match config.format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({"name": name, "value": value}))?
                ),
                OutputFormat::Table | OutputFormat::Text => println!("{}", value),
            }
        }
    }

    Ok(())
}

fn print_error(error: &BuildInfoError) {
    eprintln!("{} {}", "ERROR:".red().bold(), error);

    // Provide actionable guidance
    match error {
        BuildInfoError::ConfigError(_) => {
            eprintln!(
                "{}",
                "Hint: Check your buildinfo.toml or the ROCKSDB_BUILDINFO_* environment variables."
                    .dimmed()
            );
        }
        BuildInfoError::UnknownProperty { .. } => {
            eprintln!(
                "{}",
                "Hint: Run 'rocksdb-buildinfo properties' to list the available properties."
                    .dimmed()
            );
        }
        _ => {}
    }
}
