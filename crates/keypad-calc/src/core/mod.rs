//! Core calculator module
//!
//! Decimal arithmetic, the expression token model and the button-driven
//! [`Engine`] that ties them together.

pub mod engine;
pub mod expression;
pub mod history;
pub mod number;
mod operations;

pub use engine::{DisplayLines, Engine, EntryMode};
pub use expression::{Expression, Token};
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division (or percent-of) by a zero right-hand operand
    #[error("Division by zero")]
    DivisionByZero,
    /// Result does not fit the decimal range
    #[error("Overflow: result exceeds the decimal range")]
    Overflow,
    /// Result is in range but needs more digits than the decimal holds
    #[error("Precision loss: result needs more digits than the decimal holds")]
    PrecisionLoss,
    /// Operand text is not a decimal literal
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    /// Key label that no button carries
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl CalcError {
    /// Text shown on the current line when an operation fails
    pub const DISPLAY: &'static str = "Error";
}
