//! Runtime evaluation errors.
//!
//! Evaluation is deterministic, so none of these are retryable: evaluating the
//! same instructions with the same input always fails the same way.

use thiserror::Error;

use crate::String;

/// Error produced while executing an instruction sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// An arithmetic operator found fewer than two operands, or a boolean
    /// where it needed a number.
    #[error("invalid expression")]
    InvalidExpression,

    /// Right operand of `/` or `%` is zero.
    #[error("invalid expression, divide by zero")]
    DivideByZero,

    /// A comparison, logical or negation operator found missing or mistyped
    /// operands, or the run did not end with exactly one boolean.
    #[error("invalid condition")]
    InvalidCondition,

    /// A hand-built token that is neither an operator nor a number.
    #[error("invalid number: {text:?}")]
    InvalidNumber { text: String },
}
