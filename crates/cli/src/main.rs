mod batch_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "skilldoc",
    about = "Validate skill configs and generate their docs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Pipeline config file (defaults to ./skilldoc.toml or the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read, validate and document skill configs (default).
    Run {
        /// Config files to process (overrides `inputs` from the config file).
        files: Vec<PathBuf>,
        /// Write generated documents into this directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Lines of each document shown in the summary.
        #[arg(long)]
        preview_lines: Option<usize>,
    },
    /// Validate skill configs without generating documents.
    Validate {
        files: Vec<PathBuf>,
        /// Print verdicts as a JSON array.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check that each file exists.
    Check { files: Vec<PathBuf> },
}

/// Initialise tracing with an env-overridable filter. Logs go to stderr so
/// command output on stdout stays clean.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "skilldoc starting");

    let config = match &cli.config {
        Some(path) => skilldoc_config::load_config(path)?,
        None => skilldoc_config::discover_and_load(),
    };

    match cli.command {
        None => batch_commands::handle_run(config, Vec::new(), None, None).await,
        Some(Commands::Run {
            files,
            out_dir,
            preview_lines,
        }) => batch_commands::handle_run(config, files, out_dir, preview_lines).await,
        Some(Commands::Validate { files, json }) => {
            batch_commands::handle_validate(config, files, json).await
        },
        Some(Commands::Check { files }) => batch_commands::handle_check(config, files).await,
    }
}
