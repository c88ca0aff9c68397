/// The response field read to identify the concrete type of an object when
/// resolving type branches.
pub const DEFAULT_DISCRIMINATOR_FIELD: &str = "__typename";

/// What [`OperationRegistry::serialize`](crate::OperationRegistry::serialize)
/// does with supplied variables that the operation does not declare.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownVariablePolicy {
    /// Silently leave undeclared variables out of the normalized set.
    #[default]
    Drop,

    /// Fail with [`SerializeError::UnknownVariable`](crate::registry::SerializeError::UnknownVariable).
    Reject,
}

/// Settings that apply to every operation in an
/// [`OperationRegistry`](crate::OperationRegistry).
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub discriminator_field: String,
    pub unknown_variables: UnknownVariablePolicy,
}
impl RegistryConfig {
    pub fn with_discriminator_field(mut self, field: impl Into<String>) -> Self {
        self.discriminator_field = field.into();
        self
    }

    pub fn with_unknown_variables(mut self, policy: UnknownVariablePolicy) -> Self {
        self.unknown_variables = policy;
        self
    }
}
impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            discriminator_field: DEFAULT_DISCRIMINATOR_FIELD.to_string(),
            unknown_variables: UnknownVariablePolicy::default(),
        }
    }
}
