use crate::ValuePath;
use crate::registry::UnknownOperationError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Response for '{operation_name}' does not match its declared shape at `{path}`: {reason}")]
    ShapeMismatch {
        operation_name: String,
        path: ValuePath,
        reason: ShapeMismatchReason,
    },

    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationError),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShapeMismatchReason {
    #[error("expected a list but found {found}")]
    ExpectedList { found: &'static str },

    #[error("expected an object but found {found}")]
    ExpectedObject { found: &'static str },

    #[error("discriminator field `{field}` is missing, so no type branch can be chosen")]
    MissingDiscriminator { field: String },

    #[error("non-null field is missing")]
    MissingField,

    #[error("non-null field is null")]
    NullField,
}
