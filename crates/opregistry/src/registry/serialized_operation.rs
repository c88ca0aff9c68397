use crate::ContentHash;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// Everything an external transport needs to send one operation.
#[derive(Clone, Debug, PartialEq)]
pub struct SerializedOperation<'registry> {
    /// Hash of [`query_text`](Self::query_text).
    pub content_hash: ContentHash,
    pub operation_name: &'registry str,
    /// The operation's text followed by every fragment it reaches.
    pub query_text: &'registry str,
    /// Declared variables only, in declaration order, with defaults applied.
    pub variables: Map<String, Value>,
}
impl SerializedOperation<'_> {
    /// A GraphQL-over-HTTP request body carrying the operation text along
    /// with an automatic-persisted-query hash extension.
    pub fn to_request_body(&self) -> Value {
        json!({
            "operationName": self.operation_name,
            "query": self.query_text,
            "variables": self.variables,
            "extensions": {
                "persistedQuery": {
                    "version": 1,
                    "sha256Hash": self.content_hash.to_hex(),
                },
            },
        })
    }
}
