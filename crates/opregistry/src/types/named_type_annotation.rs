use crate::types::BuiltinScalar;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NamedTypeAnnotation {
    pub(crate) nullable: bool,
    pub(crate) type_name: String,
}

impl NamedTypeAnnotation {
    pub fn new(type_name: impl Into<String>, nullable: bool) -> Self {
        Self {
            nullable,
            type_name: type_name.into(),
        }
    }

    /// The [`BuiltinScalar`] this annotation names, if any. Enums, input
    /// objects and custom scalars return `None`.
    pub fn builtin_scalar(&self) -> Option<BuiltinScalar> {
        BuiltinScalar::from_type_name(&self.type_name)
    }

    pub fn graphql_type_name(&self) -> &str {
        self.type_name.as_str()
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }
}
