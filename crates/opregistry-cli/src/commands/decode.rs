use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::descriptor_args;
use crate::commands::descriptor_args::DescriptorArgs;
use crate::output_utils;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use std::path::PathBuf;

/// Top-level keys of a GraphQL-over-HTTP response.
const ENVELOPE_KEYS: [&str; 3] = ["data", "errors", "extensions"];

#[derive(Debug, clap::Args)]
pub(crate) struct DecodeCmd {
    #[command(flatten)]
    descriptors: DescriptorArgs,

    #[arg(
        help="Treat a top-level object holding only `data` as a response \
             envelope even when the operation selects a root field named \
             `data`.",
        long,
    )]
    envelope: bool,

    #[arg(
        help="Name of the operation the response belongs to.",
        long,
        short='o',
    )]
    operation: String,

    #[arg(
        help="Path to a JSON file holding the raw response, either bare \
             or inside a `{\"data\": ..., \"errors\": ...}` envelope.",
        long,
    )]
    response: PathBuf,
}

#[inherent::inherent]
impl RunnableCommand for DecodeCmd {
    pub async fn run(self, cli: &Cli) -> CommandResult {
        let loaded = match self.descriptors.load_registry(cli.registry_config()) {
            Ok(loaded) => loaded,
            Err(errors) => return descriptor_args::report_load_errors(errors),
        };

        let selects_root_data = match loaded.registry.resolve(&self.operation) {
            Ok(descriptor) => descriptor
                .selections()
                .iter()
                .any(|selection| selection.response_key() == Some("data")),
            Err(e) => return CommandResult::failed(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        };

        let raw_response = match read_response(&self.response) {
            Ok(raw_response) => unwrap_envelope(raw_response, selects_root_data, self.envelope),
            Err(e) => return CommandResult::failed(format_args!(
                "{} {e:#}",
                output_utils::RED_X,
            )),
        };

        match loaded.registry.decode(&self.operation, &raw_response) {
            Ok(decoded) => CommandResult::json(&decoded.into_value()),
            Err(e) => CommandResult::failed(format_args!(
                "{} {e}",
                output_utils::RED_X,
            )),
        }
    }
}

fn read_response(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file {path:#?}"))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Response file {path:#?} is not valid JSON"))
}

/// Return what sits under `data` when `response` is a response envelope,
/// otherwise `response` itself.
///
/// An object is an envelope when it has `data` and no keys besides the
/// envelope keys. A lone `data` key is ambiguous for operations that select
/// a root field named `data`; those are left alone unless `force` is set.
fn unwrap_envelope(response: Value, selects_root_data: bool, force: bool) -> Value {
    let mut fields = match response {
        Value::Object(fields) => fields,
        other => return other,
    };

    let is_envelope = fields.contains_key("data")
        && fields.keys().all(|key| ENVELOPE_KEYS.contains(&key.as_str()))
        && (force || fields.len() > 1 || !selects_root_data);
    if !is_envelope {
        return Value::Object(fields);
    }

    log::debug!("Unwrapping the `data` envelope of the response.");
    fields.remove("data").unwrap_or(Value::Null)
}
