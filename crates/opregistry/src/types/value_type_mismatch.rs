use crate::ValuePath;
use serde_json::Value;

/// A JSON value that does not have the shape its [`TypeAnnotation`](crate::types::TypeAnnotation)
/// declares.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTypeMismatch {
    pub path: ValuePath,
    pub expected: String,
    pub found: &'static str,
}
impl std::fmt::Display for ValueTypeMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected `{}` at `{}` but found {}",
            self.expected,
            self.path,
            self.found,
        )
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "a list",
        Value::Bool(_) => "a boolean",
        Value::Null => "null",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::Object(_) => "an object",
        Value::String(_) => "a string",
    }
}
