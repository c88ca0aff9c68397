use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::descriptor_args;
use crate::commands::descriptor_args::DescriptorArgs;
use crate::output_utils;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ManifestCmd {
    #[command(flatten)]
    descriptors: DescriptorArgs,

    #[arg(
        help="Write the manifest to this file instead of stdout.",
        long,
    )]
    output: Option<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ManifestCmd {
    pub async fn run(self, cli: &Cli) -> CommandResult {
        let loaded = match self.descriptors.load_registry(cli.registry_config()) {
            Ok(loaded) => loaded,
            Err(errors) => return descriptor_args::report_load_errors(errors),
        };

        let manifest = loaded.registry.persisted_query_manifest();
        let json = match manifest.to_json_pretty() {
            Ok(json) => json,
            Err(e) => return CommandResult::failed(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        let Some(output) = self.output else {
            return CommandResult::succeeded(format_args!("{json}"));
        };

        match tokio::fs::write(&output, json).await {
            Ok(()) => CommandResult::succeeded(format_args!(
                "{} Wrote {} operations to {output:#?}.",
                output_utils::GREEN_CHECK,
                manifest.operations.len(),
            )),
            Err(e) => CommandResult::failed(format_args!(
                "{} Failed to write {output:#?}: {e}",
                output_utils::RED_X,
            )),
        }
    }
}
