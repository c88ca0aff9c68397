use serde_json::Map;
use serde_json::Value;

/// A response reduced to exactly the fields an operation declares.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedResponse {
    pub(super) data: Map<String, Value>,
    pub(super) operation_name: String,
}
impl DecodedResponse {
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn get(&self, response_key: &str) -> Option<&Value> {
        self.data.get(response_key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }

    pub fn operation_name(&self) -> &str {
        self.operation_name.as_str()
    }
}
