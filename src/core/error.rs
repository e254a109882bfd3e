use thiserror::Error;

use super::TypeTag;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: TypeTag, actual: TypeTag },

    #[error("Index {index} out of range for row of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Schema mismatch at field {index}: declared {declared}, found {actual}")]
    SchemaMismatch {
        index: usize,
        declared: TypeTag,
        actual: TypeTag,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}

pub type Result<T> = std::result::Result<T, ExprError>;
