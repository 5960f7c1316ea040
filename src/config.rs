//! Command-line configuration and logging setup.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::chess_errors::{ChessError, ChessResult};

/// Default engine thinking time per move in the interactive game.
pub const DEFAULT_THINK_TIME_MS: u64 = 3000;

#[derive(Debug, Clone, Parser)]
#[command(name = "slate_chess", version, about = "A small mailbox chess engine")]
pub struct EngineConfig {
    /// Speak the UCI protocol on stdin/stdout instead of playing in the terminal.
    #[arg(short = 'u', long = "uci")]
    pub uci: bool,

    /// Engine thinking time per move in the interactive game.
    #[arg(long, default_value_t = DEFAULT_THINK_TIME_MS)]
    pub think_time_ms: u64,

    /// Write log events to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. `warn`, `slate_chess=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl EngineConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &str {
        match (&self.log_level, &self.log_file) {
            (Some(level), _) => level.as_str(),
            (None, Some(_)) => "debug",
            (None, None) => "warn",
        }
    }

    /// Installs the global tracing subscriber. Call once, before any output.
    pub fn init_tracing(&self) -> ChessResult<()> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(self.default_log_filter())
                .map_err(|err| ChessError::Logging(err.to_string()))?,
        };

        let installed = match &self.log_file {
            Some(path) => {
                let file = File::create(path)?;
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init()
            }
            None => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };

        installed.map_err(|err| ChessError::Logging(err.to_string()))
    }
}
