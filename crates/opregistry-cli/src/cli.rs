use clap::CommandFactory;
use crate::commands;
use opregistry::RegistryConfig;
use opregistry::UnknownVariablePolicy;

#[derive(clap::Parser, Debug)]
#[command(name = "opregistry", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        global=true,
        help="Response field that names an object's concrete type when \
             choosing type branches during decoding. Defaults to \
             `__typename`.",
        long,
    )]
    pub discriminator_field: Option<String>,

    #[arg(
        global=true,
        help="Fail serialization when variables are supplied that the \
             operation does not declare, instead of dropping them.",
        long,
    )]
    pub reject_unknown_variables: bool,

    #[arg(
        global=true,
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }

    pub(crate) fn registry_config(&self) -> RegistryConfig {
        let mut config = RegistryConfig::default();
        if let Some(field) = &self.discriminator_field {
            config = config.with_discriminator_field(field);
        }
        if self.reject_unknown_variables {
            config = config.with_unknown_variables(UnknownVariablePolicy::Reject);
        }
        config
    }
}
