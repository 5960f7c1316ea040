use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use slate_chess::chess_errors::ChessResult;
use slate_chess::cli::cli_top::run_cli;
use slate_chess::config::EngineConfig;
use slate_chess::uci::uci_top::run_stdio_loop;

fn main() -> ExitCode {
    let config = EngineConfig::parse();
    if let Err(err) = config.init_tracing() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let result: ChessResult<()> = if config.uci {
        run_stdio_loop().map_err(Into::into)
    } else {
        run_cli(io::stdin().lock(), io::stdout(), config.think_time_ms)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "engine stopped");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
