//! archtree: interactive architecture dependency-tree explorer

#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use archtree::{
    cli,
    config::{
        generate_json_schema, load_or_default, CheckConfig, IndexConfig, OutputConfig,
        OutputFormat, ViewConfig,
    },
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with payload format info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nPayload Format:",
        "\n  JSON tree: root node recursively containing `children`,",
        "\n  with optional dependsOn, technos, host, satisfaction fields",
        "\n\nOutput Formats:",
        "\n  tui, json, summary"
    )
}

#[derive(Parser)]
#[command(name = "archtree")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Interactive architecture dependency-tree explorer", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Clean run
    1  `check` found data-quality issues
    3  Error occurred

EXAMPLES:
    # Explore a catalog interactively
    archtree view architecture.json

    # Start pre-filtered
    archtree view architecture.json --filter-techno PHP --filter-host OVH

    # Dump the derived index for other tooling
    archtree index architecture.json --pretty > index.json

    # Gate a catalog in CI
    archtree check architecture.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the tree payload
    tree: PathBuf,

    /// Output format (auto detects TTY: tui if interactive, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long)]
    no_color: bool,

    /// Name filter applied at startup (substring, case-insensitive)
    #[arg(long)]
    filter_name: Option<String>,

    /// Technology filter applied at startup; every value must match.
    /// Can be specified multiple times.
    #[arg(long = "filter-techno", value_name = "LABEL")]
    filter_technos: Vec<String>,

    /// Host filter applied at startup; every value must match.
    /// Can be specified multiple times.
    #[arg(long = "filter-host", value_name = "LABEL")]
    filter_hosts: Vec<String>,
}

/// Arguments for the `index` subcommand
#[derive(Parser)]
struct IndexArgs {
    /// Path to the tree payload
    tree: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Path to the tree payload
    tree: PathBuf,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore a catalog interactively (or dump it non-interactively)
    View(ViewArgs),

    /// Compute and dump the derived per-node index as JSON
    Index(IndexArgs),

    /// Report data-quality issues the explorer tolerates silently
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Print the JSON Schema for the config file format
    ConfigSchema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            cli::exit_codes::ERROR
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let (app_config, loaded_from) = load_or_default(cli.config.as_deref())?;
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    match cli.command {
        Commands::View(args) => {
            // CLI filters override config-file defaults per field.
            let mut filters = app_config.filters.clone();
            if let Some(name) = args.filter_name {
                filters.name = name.to_lowercase();
            }
            if !args.filter_technos.is_empty() {
                filters.technos = args.filter_technos;
            }
            if !args.filter_hosts.is_empty() {
                filters.hosts = args.filter_hosts;
            }
            cli::run_view(ViewConfig {
                tree_path: args.tree,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color: args.no_color,
                },
                filters,
                tui: app_config.tui,
            })
        }
        Commands::Index(args) => cli::run_index(IndexConfig {
            tree_path: args.tree,
            file: args.output_file,
            pretty: args.pretty,
        }),
        Commands::Check(args) => cli::run_check(CheckConfig {
            tree_path: args.tree,
            json: args.json,
        }),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(cli::exit_codes::SUCCESS)
        }
        Commands::ConfigSchema => {
            println!("{}", generate_json_schema());
            Ok(cli::exit_codes::SUCCESS)
        }
    }
}

/// Initialize tracing with an env-filter; `-v` raises the default level,
/// `-q` silences everything below errors.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
