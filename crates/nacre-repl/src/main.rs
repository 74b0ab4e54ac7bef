//! nacre CLI entry point.
//!
//! Usage:
//!   nacre                          # Interactive session on an empty tree
//!   nacre --vfs tree.csv           # Load a filesystem first
//!   nacre --startup warmup.sh      # Replay a script, then go interactive

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nacre_kernel::ShellConfig;
use nacre_repl::Repl;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A POSIX-like shell over an in-memory virtual filesystem.
#[derive(Parser, Debug)]
#[command(name = "nacre", version, about)]
struct Cli {
    /// CSV description of the filesystem to load at startup.
    #[arg(long, value_name = "FILE")]
    vfs: Option<PathBuf>,

    /// Script to replay before going interactive.
    #[arg(long, value_name = "FILE")]
    startup: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("nacre: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    tracing::debug!(vfs = ?cli.vfs, startup = ?cli.startup, "starting up");

    let config = ShellConfig {
        user: env::var("USER").unwrap_or_else(|_| "user".to_string()),
        host: env::var("HOSTNAME").unwrap_or_else(|_| "host".to_string()),
    };
    let mut repl = Repl::new(config)?;

    repl.banner();
    if let Some(path) = &cli.vfs {
        repl.load_vfs(path);
    }
    if let Some(path) = &cli.startup {
        if !repl.run_script(path) {
            // The script ran `exit`; never go interactive.
            return Ok(ExitCode::SUCCESS);
        }
    }
    repl.run_interactive()?;
    Ok(ExitCode::SUCCESS)
}
