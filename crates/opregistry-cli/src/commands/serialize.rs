use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::descriptor_args;
use crate::commands::descriptor_args::DescriptorArgs;
use crate::output_utils;

#[derive(Debug, clap::Args)]
pub(crate) struct SerializeCmd {
    #[command(flatten)]
    descriptors: DescriptorArgs,

    #[arg(
        help="Name of the operation to serialize.",
        long,
        short='o',
    )]
    operation: String,

    #[arg(
        default_value="{}",
        help="Variables for the operation, as a JSON object.",
        long,
    )]
    variables: String,
}

#[inherent::inherent]
impl RunnableCommand for SerializeCmd {
    pub async fn run(self, cli: &Cli) -> CommandResult {
        let variables: serde_json::Value = match serde_json::from_str(&self.variables) {
            Ok(variables) => variables,
            Err(e) => return CommandResult::failed(format_args!(
                "{} `--variables` is not valid JSON: {e}",
                output_utils::RED_X,
            )),
        };

        let loaded = match self.descriptors.load_registry(cli.registry_config()) {
            Ok(loaded) => loaded,
            Err(errors) => return descriptor_args::report_load_errors(errors),
        };

        let serialized = match loaded.registry.serialize(&self.operation, &variables) {
            Ok(serialized) => serialized,
            Err(e) => return CommandResult::failed(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        CommandResult::json(&serialized.to_request_body())
    }
}
