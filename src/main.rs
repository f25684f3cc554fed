//! `configq`: query configuration sources from the command line.
//!
//! ```text
//! configq file:/etc/app/example.cfg get sec.key
//! configq --separator / app.toml keys
//! configq app.json dump
//! configq file:/etc/app/example.cfg watch
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use config_backends::backend::{ReloadOutcome, SourceWatcher};
use config_backends::observability::init_logging;
use config_backends::{open_with, Backend, FileBackend, OpenOptions};

#[derive(Parser)]
#[command(name = "configq")]
#[command(about = "Query hierarchical configuration sources", long_about = None)]
struct Cli {
    /// Source locator, e.g. file:/etc/app/example.cfg
    locator: String,

    /// Path separator
    #[arg(short, long, default_value_t = '.')]
    separator: char,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path (exit status 1 when absent)
    Get { path: String },
    /// List every leaf path with its value
    Keys,
    /// Print the whole tree as JSON
    Dump,
    /// Reload on file changes and report each reload until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let options = OpenOptions::default().with_separator(cli.separator);

    match cli.command {
        Commands::Get { path } => {
            let backend = open_with(&cli.locator, options)?;
            match backend.get_string(&path) {
                Some(value) => println!("{}", value),
                None => {
                    eprintln!("{}: not set", path);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Keys => {
            let backend = open_with(&cli.locator, options)?;
            for (path, value) in backend.snapshot().leaves(backend.separator()) {
                println!("{} = {}", path, value);
            }
        }
        Commands::Dump => {
            let backend = open_with(&cli.locator, options)?;
            println!("{}", serde_json::to_string_pretty(&*backend.snapshot())?);
        }
        Commands::Watch => {
            let backend = Arc::new(FileBackend::load_with(&cli.locator, options)?);
            return watch(backend).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn watch(backend: Arc<FileBackend>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (watcher, mut outcomes) = SourceWatcher::new(backend);
    // dropping the handle stops notifications
    let _handle = watcher.run()?;

    loop {
        tokio::select! {
            outcome = outcomes.recv() => match outcome {
                Some(ReloadOutcome::Reloaded { locator }) => println!("reloaded {}", locator),
                Some(ReloadOutcome::Failed { locator, error }) => {
                    eprintln!("reload of {} failed: {}", locator, error)
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}
