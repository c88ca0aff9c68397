mod decode;
mod descriptor_args;
mod manifest;
mod serialize;
mod validate;

use crate::Cli;
use crate::CommandResult;
use decode::DecodeCmd;
use manifest::ManifestCmd;
use serialize::SerializeCmd;
use validate::ValidateCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "opregistry")]
pub(crate) enum CommandEnum {
    /// Map a raw JSON response onto the shape an operation declares.
    Decode(Box<DecodeCmd>),

    /// Write the persisted query manifest for every executable operation.
    Manifest(Box<ManifestCmd>),

    /// Validate variables for an operation and print its request body.
    Serialize(Box<SerializeCmd>),

    /// Load descriptor files and check that they compose into a registry.
    Validate(Box<ValidateCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: &Cli) -> CommandResult {
        match self {
            Self::Decode(cmd) => cmd.run(cli).await,
            Self::Manifest(cmd) => cmd.run(cli).await,
            Self::Serialize(cmd) => cmd.run(cli).await,
            Self::Validate(cmd) => cmd.run(cli).await,
        }
    }
}
