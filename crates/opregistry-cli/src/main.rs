mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;
use std::process::ExitCode;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();
    init_logging(&cli);

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e:#}");
                ExitCode::FAILURE
            },
        };
    };

    command.run(&cli).await.report()
}

/// `-v` forces debug logging; otherwise `LOG_LEVEL` picks the level.
fn init_logging(cli: &Cli) {
    let (log_level, rejected_env_value) = if cli.verbose {
        (tracing::Level::DEBUG, None)
    } else {
        match std::env::var("LOG_LEVEL") {
            Ok(raw) => match parse_log_level(&raw) {
                Some(level) => (level, None),
                None => (DEFAULT_LOG_LEVEL, Some(raw)),
            },
            Err(_) => (DEFAULT_LOG_LEVEL, None),
        }
    };

    // stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Logging at level `{log_level}`.");

    if let Some(raw) = rejected_env_value {
        log::warn!("Ignoring invalid `LOG_LEVEL` environment variable value `{}`.", raw.trim());
    }
}

fn parse_log_level(raw: &str) -> Option<tracing::Level> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "debug" | "verbose" => Some(tracing::Level::DEBUG),
        "error" => Some(tracing::Level::ERROR),
        "info" => Some(tracing::Level::INFO),
        "trace" => Some(tracing::Level::TRACE),
        "warn" => Some(tracing::Level::WARN),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;

    #[test]
    fn log_level_names_are_case_insensitive() {
        assert_eq!(parse_log_level(" Debug\n"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level("VERBOSE"), Some(tracing::Level::DEBUG));
        assert_eq!(parse_log_level("warn"), Some(tracing::Level::WARN));
        assert_eq!(parse_log_level("loud"), None);
    }
}
