//! Error types shared across the crate

use thiserror::Error;

use crate::instruments::Ticker;

/// Reasons an amount expression could not be evaluated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("character '{ch}' at position {pos} is not allowed")]
    DisallowedChar { ch: char, pos: usize },

    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    #[error("unexpected {found} at position {pos}")]
    Unexpected { found: String, pos: usize },

    #[error("missing closing parenthesis")]
    UnclosedParen,

    #[error("parentheses nested deeper than {limit}")]
    TooDeep { limit: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

/// Configuration problems detected before a projection runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("no profile or rate override for instrument {ticker}")]
    MissingRates { ticker: Ticker },
}

/// Failures while loading the instrument reference table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read instrument table: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed instrument CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid instrument row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}
