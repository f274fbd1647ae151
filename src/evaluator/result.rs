use crate::error::EvaluationError;
use serde::ser::{Serialize, Serializer};
use std::borrow::Cow;

/// One human-readable line per question traversed, in traversal order.
pub type EvaluationPath = Vec<String>;

/// The outcome of evaluating a tree against a set of arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult {
    /// A leaf was reached.
    Success {
        decision: String,
        reason: String,
        path: EvaluationPath,
    },
    /// The arguments could not carry evaluation to a leaf.
    Error {
        error: EvaluationError,
        path: EvaluationPath,
    },
}

/// The decision reported for evaluation errors.
pub const ERROR_DECISION: &str = "Error";

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluationResult::Success { .. })
    }

    pub fn decision(&self) -> &str {
        match self {
            EvaluationResult::Success { decision, .. } => decision,
            EvaluationResult::Error { .. } => ERROR_DECISION,
        }
    }

    pub fn reason(&self) -> Cow<'_, str> {
        match self {
            EvaluationResult::Success { reason, .. } => Cow::Borrowed(reason),
            EvaluationResult::Error { error, .. } => Cow::Owned(error.to_string()),
        }
    }

    pub fn path(&self) -> &[String] {
        match self {
            EvaluationResult::Success { path, .. } | EvaluationResult::Error { path, .. } => path,
        }
    }

    pub fn error(&self) -> Option<&EvaluationError> {
        match self {
            EvaluationResult::Success { .. } => None,
            EvaluationResult::Error { error, .. } => Some(error),
        }
    }

    /// The `{"decision", "reason", "path_taken"}` payload handed back to HTTP
    /// handlers and tool-calling layers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "decision": self.decision(),
            "reason": self.reason(),
            "path_taken": self.path(),
        })
    }
}

#[derive(serde::Serialize)]
struct ResultPayload<'a> {
    decision: &'a str,
    reason: Cow<'a, str>,
    path_taken: &'a [String],
}

impl Serialize for EvaluationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ResultPayload {
            decision: self.decision(),
            reason: self.reason(),
            path_taken: self.path(),
        }
        .serialize(serializer)
    }
}
