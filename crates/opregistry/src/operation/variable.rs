use crate::types::TypeAnnotation;
use serde::Deserialize;
use serde_json::Value;

/// A declared parameter of an operation (or an argument definition of a
/// fragment).
///
/// `default_value` distinguishes "no default" (`None`) from an explicit
/// `null` default (`Some(Value::Null)`).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDefinition {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) default_value: Option<Value>,
    pub(crate) name: String,
    #[serde(rename = "type")]
    pub(crate) type_annotation: TypeAnnotation,
}
impl VariableDefinition {
    pub fn new(name: impl Into<String>, type_annotation: TypeAnnotation) -> Self {
        Self {
            default_value: None,
            name: name.into(),
            type_annotation,
        }
    }

    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// A variable must be supplied by the caller when it has no default and
    /// its type is non-null.
    pub fn is_required(&self) -> bool {
        !self.has_default() && !self.type_annotation.nullable()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
