mod builtin_scalar;
mod list_type_annotation;
mod named_type_annotation;
mod type_annotation;
mod value_type_mismatch;

pub use builtin_scalar::BuiltinScalar;
pub use list_type_annotation::ListTypeAnnotation;
pub use named_type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_annotation::TypeAnnotationParseError;
pub use value_type_mismatch::ValueTypeMismatch;
pub(crate) use value_type_mismatch::json_kind;

#[cfg(test)]
mod tests;
