//! Error types for the math engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("No equals sign found in equation")]
    MissingEquals,

    #[error("Multiple equals signs found")]
    MultipleEquals,

    #[error("Cannot evaluate expression: {0}")]
    Expression(String),

    #[error("Cannot parse number: {0}")]
    BadNumber(String),

    #[error("Denominator must be non-zero")]
    ZeroDenominator,

    #[error("Division by a zero fraction")]
    DivisionByZero,

    #[error("Leading coefficient of a quadratic must be non-zero")]
    NotQuadratic,

    #[error("Factorial of a negative number")]
    NegativeFactorial,
}
