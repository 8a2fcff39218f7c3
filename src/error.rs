use thiserror::Error;

use crate::expr::Op;

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid arity for {op}: expected {expected} operand(s), got {got}")]
    InvalidArity {
        op: Op,
        expected: &'static str,
        got: usize,
    },
    #[error("domain error: {0}")]
    Domain(String),
}

impl DiffError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        DiffError::InvalidArgument(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        DiffError::Domain(msg.into())
    }
}
