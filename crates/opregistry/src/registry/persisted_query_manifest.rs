use crate::operation::OperationKind;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// A single operation in a persisted query manifest.
#[derive(Debug, Clone, Deserialize, PartialEq, Serialize)]
pub struct ManifestOperation {
    /// The full document text sent for this operation.
    pub body: String,
    /// Hex SHA-256 of `body`.
    pub id: String,
    #[serde(rename = "type", with = "manifest_operation_type")]
    pub kind: OperationKind,
    pub name: String,
}

/// The set of operation documents a server may accept by id, in the
/// `apollo-persisted-query-manifest` format.
#[derive(Debug, Clone, Deserialize, PartialEq, Serialize)]
pub struct PersistedQueryManifest {
    pub format: String,
    pub operations: Vec<ManifestOperation>,
    pub version: u64,
}

impl PersistedQueryManifest {
    pub const FORMAT: &'static str = "apollo-persisted-query-manifest";
    pub const VERSION: u64 = 1;

    pub fn new(operations: Vec<ManifestOperation>) -> Self {
        Self {
            format: Self::FORMAT.to_string(),
            operations,
            version: Self::VERSION,
        }
    }

    pub fn validate(self) -> Result<Self, ManifestError> {
        if self.format != Self::FORMAT {
            return Err(ManifestError::UnsupportedFormat(self.format));
        }

        if self.version != Self::VERSION {
            return Err(ManifestError::UnsupportedVersion(self.version));
        }

        Ok(self)
    }

    pub fn parse_and_validate(raw_manifest: &str) -> Result<Self, ManifestError> {
        serde_json::from_str::<PersistedQueryManifest>(raw_manifest)
            .map_err(|e| ManifestError::Parse(e.to_string()))?
            .validate()
    }

    pub fn to_json_pretty(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(|e| ManifestError::Serialize(e.to_string()))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ManifestError {
    #[error("Could not parse persisted query manifest: {0}")]
    Parse(String),

    #[error("Could not serialize persisted query manifest: {0}")]
    Serialize(String),

    #[error("Manifest format is not '{expected}': found '{0}'", expected = PersistedQueryManifest::FORMAT)]
    UnsupportedFormat(String),

    #[error("Persisted query manifest version {0} is not supported")]
    UnsupportedVersion(u64),
}

// The manifest spells operation types in lowercase (`query`, `mutation`, ...).
mod manifest_operation_type {
    use crate::operation::OperationKind;
    use serde::Deserialize;

    pub(super) fn serialize<S: serde::Serializer>(
        kind: &OperationKind,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(kind.keyword())
    }

    pub(super) fn deserialize<'de, D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OperationKind, D::Error> {
        let keyword = String::deserialize(deserializer)?;
        match keyword.as_str() {
            "mutation" => Ok(OperationKind::Mutation),
            "query" => Ok(OperationKind::Query),
            "subscription" => Ok(OperationKind::Subscription),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["query", "mutation", "subscription"],
            )),
        }
    }
}
