use crate::error::{ErrorSeverity, SheetError};
use crate::expression::Function;

/// Errors raised while parsing or evaluating a formula.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at index {index}")]
    UnexpectedChar { ch: char, index: usize },

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("parenthesis opened at index {index} is never closed")]
    UnclosedParen { index: usize },

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("invalid variable at index {index}")]
    InvalidVariable { index: usize },

    #[error("unable to resolve variable ${0}")]
    UnresolvedVariable(String),

    #[error("function not defined: {0}")]
    UnknownFunction(String),

    #[error("{function} does not accept {count} argument(s)")]
    ArgumentCount { function: Function, count: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    NonFinite,
}

impl SheetError for EvalError {
    fn severity(&self) -> ErrorSeverity {
        // Formula failures never abort the sheet; the caller substitutes 0.
        ErrorSeverity::Degraded
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "EVAL_EMPTY",
            Self::UnexpectedChar { .. } => "EVAL_UNEXPECTED_CHAR",
            Self::UnexpectedEnd => "EVAL_UNEXPECTED_END",
            Self::UnclosedParen { .. } => "EVAL_UNCLOSED_PAREN",
            Self::InvalidNumber { .. } => "EVAL_INVALID_NUMBER",
            Self::InvalidVariable { .. } => "EVAL_INVALID_VARIABLE",
            Self::UnresolvedVariable(_) => "EVAL_UNRESOLVED_VARIABLE",
            Self::UnknownFunction(_) => "EVAL_UNKNOWN_FUNCTION",
            Self::ArgumentCount { .. } => "EVAL_ARGUMENT_COUNT",
            Self::DivisionByZero => "EVAL_DIVISION_BY_ZERO",
            Self::NonFinite => "EVAL_NON_FINITE",
        }
    }
}
