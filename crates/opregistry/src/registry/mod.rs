mod decode_error;
mod decoded_response;
mod document_composer;
mod operation_registry;
mod operation_registry_builder;
mod persisted_query_manifest;
mod response_decoder;
mod serialize_error;
mod serialized_operation;
mod variable_normalizer;

pub use decode_error::DecodeError;
pub use decode_error::ShapeMismatchReason;
pub use decoded_response::DecodedResponse;
pub use operation_registry::OperationRegistry;
pub use operation_registry::UnknownOperationError;
pub use operation_registry_builder::OperationRegistryBuilder;
pub use operation_registry_builder::RegisterOutcome;
pub use operation_registry_builder::RegistryBuildError;
pub use persisted_query_manifest::ManifestError;
pub use persisted_query_manifest::ManifestOperation;
pub use persisted_query_manifest::PersistedQueryManifest;
pub use serialize_error::SerializeError;
pub use serialized_operation::SerializedOperation;

#[cfg(test)]
mod tests;
