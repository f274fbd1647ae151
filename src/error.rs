use crate::tree::Value;
use thiserror::Error;

/// Configuration errors in a tree definition.
///
/// These are fatal: they indicate a defect in statically authored tree data and
/// abort evaluation immediately instead of being reported as a decision.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Unsupported operator '{symbol}'")]
    UnsupportedOperator { symbol: String },

    #[error("Question '{question}' has no branches")]
    EmptyBranches { question: String },

    #[error("Invalid regex pattern '{pattern}' under question '{question}': {message}")]
    InvalidPattern {
        question: String,
        pattern: String,
        message: String,
    },

    #[error("Tree depth exceeded the maximum of {max_depth} questions")]
    DepthExceeded { max_depth: usize },
}

/// Recoverable evaluation mismatches.
///
/// These never abort evaluation; they are carried inside
/// [`EvaluationResult::Error`](crate::evaluator::EvaluationResult::Error) and
/// their `Display` output is the user-facing reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("Question '{question}' could not be answered with supplied arguments")]
    NoMatchingArgument { question: String },

    #[error("Invalid value for {label}: {value}")]
    NoMatchingBranch { label: String, value: Value },
}

/// Errors that can occur when converting an authored format into a [`Tree`](crate::tree::Tree).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeConversionError {
    #[error("Failed to parse tree JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid value in tree data: {0}")]
    InvalidValue(String),

    #[error("Predicate '{0}' is not present in the predicate catalog")]
    UnknownPredicate(String),
}

/// Errors raised while exposing a tree as an LLM-callable tool.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
