use crate::ReadContentError;
use crate::operation::OperationDescriptor;
use crate::operation::OperationDescriptorBuildError;
use crate::operation::OperationKind;
use crate::operation::Selection;
use crate::operation::VariableDefinition;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// The JSON form of an [`OperationDescriptor`], as emitted by the external
/// compiler step.
///
/// A document is never trusted as-is: [`build`](Self::build) runs it
/// through [`OperationDescriptorBuilder`](crate::operation::OperationDescriptorBuilder)
/// so every load re-validates the tree and recomputes the content hash.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorDocument {
    pub kind: OperationKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_text: Option<String>,
    pub selections: Vec<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable_definitions: Vec<VariableDefinition>,
}
impl DescriptorDocument {
    /// Parse JSON holding either a single document or an array of them.
    pub fn parse_many(content: &str) -> Result<Vec<Self>, serde_json::Error> {
        match serde_json::from_str::<Value>(content)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect(),
            other => Ok(vec![serde_json::from_value(other)?]),
        }
    }

    pub fn build(self) -> Result<OperationDescriptor, Vec<OperationDescriptorBuildError>> {
        let mut builder = OperationDescriptor::builder(self.name, self.kind);
        for variable in self.variable_definitions {
            builder = builder.add_variable(variable)?;
        }
        for selection in self.selections {
            builder = builder.add_selection(selection);
        }
        if let Some(type_condition) = self.type_condition {
            builder = builder.type_condition(type_condition);
        }
        if let Some(query_text) = self.query_text {
            builder = builder.query_text(query_text);
        }
        builder.build()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DescriptorLoadError {
    #[error("Invalid descriptor '{name}'{}: {}", format_file(.file_path), format_build_errors(.errors))]
    InvalidDescriptor {
        errors: Vec<OperationDescriptorBuildError>,
        file_path: Option<PathBuf>,
        name: String,
    },

    #[error("Malformed descriptor JSON{}: {message}", format_file(.file_path))]
    MalformedJson {
        file_path: Option<PathBuf>,
        message: String,
    },

    #[error(transparent)]
    ReadError(#[from] ReadContentError),
}

fn format_file(file_path: &Option<PathBuf>) -> String {
    file_path
        .as_ref()
        .map(|path| format!(" in {}", path.display()))
        .unwrap_or_default()
}

fn format_build_errors(errors: &[OperationDescriptorBuildError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
