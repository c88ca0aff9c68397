use crate::Cli;
use crate::CommandResult;

/// A subcommand. Commands read the global flags (registry configuration,
/// verbosity) from `cli` and report through a [`CommandResult`] instead of
/// printing directly.
pub(crate) trait RunnableCommand: std::fmt::Debug {
    async fn run(self, cli: &Cli) -> CommandResult;
}
