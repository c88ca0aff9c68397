use crate::output_utils;
use serde_json::Value;
use std::process::ExitCode;

/// Outcome of a subcommand. Output goes to stdout so it can be piped into
/// other tools; failures go to stderr and exit non-zero.
#[derive(Debug)]
pub(crate) enum CommandResult {
    Failed(String),
    Succeeded(String),
}

impl CommandResult {
    pub fn failed(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self::Failed(fmt_args.to_string())
    }

    pub fn succeeded(fmt_args: std::fmt::Arguments<'_>) -> Self {
        Self::Succeeded(fmt_args.to_string())
    }

    /// Pretty-printed JSON output.
    pub fn json(value: &Value) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(json) => Self::Succeeded(json),
            Err(e) => Self::failed(format_args!(
                "{} Failed to render JSON output: {e}",
                output_utils::RED_X,
            )),
        }
    }

    /// Print the result and turn it into the process exit code.
    pub fn report(self) -> ExitCode {
        match self {
            Self::Failed(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            },
            Self::Succeeded(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            },
        }
    }
}
