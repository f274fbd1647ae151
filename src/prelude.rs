//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the kettei crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kettei::prelude::*;
//!
//! # fn run_example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("trees/loan.json")?;
//! let tree = TreeDefinition::from_json(&json)?.into_tree(&PredicateCatalog::new())?;
//!
//! let evaluator = Evaluator::new();
//! evaluator.validate(&tree)?;
//!
//! let args = Arguments::new().with("credit_score", 720).with("income", 65000);
//! println!("{}", TraceFormatter::format_result(&evaluator.eval(&tree, &args)?));
//! # Ok(())
//! # }
//! ```

// Evaluation
pub use crate::evaluator::{Arguments, EvaluationPath, EvaluationResult, Evaluator};
pub use crate::operator::OperatorRegistry;

// Tree model
pub use crate::tree::{
    Branch, BranchKey, IntoTree, Node, Predicate, PredicateCatalog, Tree, TreeDefinition, Value,
    Verdict,
};

// Tool adapter
pub use crate::tool::{DecisionTool, ParameterKind, ToolParameter};

// Error types
pub use crate::error::{EvaluationError, ToolError, TreeConversionError, TreeError};

// Trace formatting
pub use crate::trace::TraceFormatter;
