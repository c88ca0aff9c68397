use crate::operation::OperationKind;
use crate::registry::UnknownOperationError;
use crate::types::ValueTypeMismatch;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SerializeError {
    #[error("Operation '{operation_name}' requires variable '${variable_name}', which was not provided")]
    MissingVariable {
        operation_name: String,
        variable_name: String,
    },

    #[error("'{operation_name}' is a {kind} and cannot be sent on its own")]
    NotExecutable {
        kind: OperationKind,
        operation_name: String,
    },

    #[error("Invalid variables for operation '{operation_name}': {mismatch}")]
    TypeMismatch {
        mismatch: ValueTypeMismatch,
        operation_name: String,
    },

    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationError),

    #[error("Operation '{operation_name}' does not declare variable '${variable_name}'")]
    UnknownVariable {
        operation_name: String,
        variable_name: String,
    },
}
