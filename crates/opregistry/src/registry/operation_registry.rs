use crate::ContentHash;
use crate::RegistryConfig;
use crate::operation::OperationDescriptor;
use crate::registry::DecodeError;
use crate::registry::DecodedResponse;
use crate::registry::ManifestOperation;
use crate::registry::OperationRegistryBuilder;
use crate::registry::PersistedQueryManifest;
use crate::registry::SerializeError;
use crate::registry::SerializedOperation;
use crate::registry::response_decoder::ResponseDecoder;
use crate::registry::variable_normalizer;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// The text actually sent for an executable operation: its own definition
/// plus every fragment it reaches.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PreparedDocument {
    pub(crate) content_hash: ContentHash,
    pub(crate) text: String,
}

/// An immutable, fully validated set of operation descriptors.
///
/// Produced by [`OperationRegistryBuilder::build`]. Nothing here mutates,
/// so a registry can be wrapped in an `Arc` and read from any number of
/// threads without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationRegistry {
    pub(super) config: RegistryConfig,
    pub(super) descriptors: IndexMap<String, OperationDescriptor>,
    pub(super) documents: HashMap<String, PreparedDocument>,
    pub(super) names_by_document_hash: HashMap<ContentHash, String>,
}

impl OperationRegistry {
    pub fn builder() -> OperationRegistryBuilder {
        OperationRegistryBuilder::new()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// All registered descriptors, in registration order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.descriptors.values()
    }

    pub fn resolve(&self, name: &str) -> Result<&OperationDescriptor, UnknownOperationError> {
        self.descriptors.get(name).ok_or_else(|| UnknownOperationError {
            operation_name: name.to_string(),
        })
    }

    /// Look up an executable operation by the hash of the document
    /// [`serialize`](Self::serialize) would send for it.
    pub fn resolve_by_hash(&self, content_hash: &ContentHash) -> Option<&OperationDescriptor> {
        self.names_by_document_hash
            .get(content_hash)
            .and_then(|name| self.descriptors.get(name))
    }

    /// Validate `variables` against the operation's declared parameters and
    /// return everything a transport needs to send it.
    ///
    /// `variables` must be a JSON object (or `null`, treated as empty).
    /// Declared defaults fill in absent variables; see [`SerializeError`]
    /// for the ways this can fail.
    pub fn serialize(
        &self,
        name: &str,
        variables: &Value,
    ) -> Result<SerializedOperation<'_>, SerializeError> {
        let descriptor = self.resolve(name)?;
        let Some(document) = self.documents.get(name) else {
            return Err(SerializeError::NotExecutable {
                kind: descriptor.kind(),
                operation_name: name.to_string(),
            });
        };

        let variables = variable_normalizer::normalize_variables(
            descriptor,
            variables,
            self.config.unknown_variables,
        )?;

        Ok(SerializedOperation {
            content_hash: document.content_hash,
            operation_name: descriptor.name(),
            query_text: document.text.as_str(),
            variables,
        })
    }

    /// Map a raw response object onto the shape `name` declares.
    ///
    /// Only declared fields are kept. Type branches whose declared type does
    /// not match the object's discriminator are dropped.
    pub fn decode(
        &self,
        name: &str,
        raw_response: &Value,
    ) -> Result<DecodedResponse, DecodeError> {
        let descriptor = self.resolve(name)?;
        let decoder = ResponseDecoder::new(self, descriptor.name());
        let data = decoder.decode_root(descriptor, raw_response)?;
        Ok(DecodedResponse {
            data,
            operation_name: descriptor.name().to_string(),
        })
    }

    /// A persisted query manifest listing every executable operation, keyed
    /// by the hash of the document it sends.
    pub fn persisted_query_manifest(&self) -> PersistedQueryManifest {
        let operations = self.descriptors
            .values()
            .filter_map(|descriptor| {
                let document = self.documents.get(descriptor.name())?;
                Some(ManifestOperation {
                    body: document.text.clone(),
                    id: document.content_hash.to_hex(),
                    kind: descriptor.kind(),
                    name: descriptor.name().to_string(),
                })
            })
            .collect();

        PersistedQueryManifest::new(operations)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("No operation named '{operation_name}' is registered")]
pub struct UnknownOperationError {
    pub operation_name: String,
}
