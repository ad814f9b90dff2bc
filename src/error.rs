//! Error types for the algebra engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlgebraError>;

/// Every failure the engine can report. All operations are total except division
/// and approximation; nothing is logged or swallowed internally.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AlgebraError {
    /// A symbolic constant has no registered numeric value. Recoverable: the
    /// caller can retry with a [`ConstantTable`](crate::consts::ConstantTable)
    /// that defines the constant.
    #[error("'{0}' does not have a defined approximate decimal value")]
    UnknownConstant(String),

    /// The divisor of a division reduced to the zero atom.
    #[error("division by zero")]
    DivisionByZero,

    /// A value violates the canonical-form invariants. Only produced by
    /// [`Expr::check_canonical`](crate::expr::Expr::check_canonical); the
    /// operators themselves never construct such a value.
    #[error("canonical-form invariant violated: {0}")]
    InvariantViolation(String),
}
