use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::descriptor_args;
use crate::commands::descriptor_args::DescriptorArgs;
use crate::output_utils;

#[derive(Debug, clap::Args)]
pub(crate) struct ValidateCmd {
    #[command(flatten)]
    descriptors: DescriptorArgs,
}

#[inherent::inherent]
impl RunnableCommand for ValidateCmd {
    pub async fn run(self, cli: &Cli) -> CommandResult {
        let loaded = match self.descriptors.load_registry(cli.registry_config()) {
            Ok(loaded) => loaded,
            Err(errors) => return descriptor_args::report_load_errors(errors),
        };

        let num_fragments = loaded.registry
            .operations()
            .filter(|descriptor| !descriptor.kind().is_executable())
            .count();

        CommandResult::succeeded(format_args!(
            concat!(
                "{} All operation descriptors validated successfully:\n",
                "  * Loaded {} files.\n",
                "  * Skipped {} non-descriptor files.\n",
                "  * Validated {} executable operations.\n",
                "  * Validated {} fragments.",
            ),
            output_utils::GREEN_CHECK,
            loaded.num_files,
            loaded.num_skipped,
            loaded.registry.len() - num_fragments,
            num_fragments,
        ))
    }
}
