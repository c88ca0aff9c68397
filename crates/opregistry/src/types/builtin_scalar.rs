use serde_json::Value;

/// The scalar types every GraphQL schema defines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuiltinScalar {
    Boolean,
    Float,
    ID,
    Int,
    String,
}
impl BuiltinScalar {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Boolean" => Some(Self::Boolean),
            "Float" => Some(Self::Float),
            "ID" => Some(Self::ID),
            "Int" => Some(Self::Int),
            "String" => Some(Self::String),
            _ => None,
        }
    }

    /// Whether a non-null JSON value can be sent for this scalar.
    ///
    /// `Int` is a signed 32-bit integer; `ID` accepts both strings and
    /// integers.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
            Self::Float => value.is_number(),
            Self::ID => value.is_string() || value.is_i64() || value.is_u64(),
            Self::Int => value
                .as_i64()
                .is_some_and(|i| i32::try_from(i).is_ok()),
            Self::String => value.is_string(),
        }
    }
}
