//! # Kettei - Declarative Decision-Tree Evaluation Engine
//!
//! **Kettei** interprets nested question/branch trees to classify a set of named
//! input values into a decision, together with an ordered trace of every
//! comparison that led there. It is built for rule-based classification
//! (clinical thresholds, eligibility rules) exposed to LLM tool-calling layers
//! and HTTP handlers.
//!
//! ## Core Workflow
//!
//! 1.  **Author a Tree**: Build a [`Tree`](tree::Tree) with the fluent
//!     [`Node`](tree::Node) API, or load one from JSON through
//!     [`TreeDefinition`](tree::TreeDefinition) and the [`IntoTree`](tree::IntoTree) trait.
//! 2.  **Validate**: Run [`Evaluator::validate`](evaluator::Evaluator::validate) once
//!     at load time. Unregistered operators and broken regex patterns are
//!     authoring defects and are reported before any request is served.
//! 3.  **Evaluate**: Call [`Evaluator::eval`](evaluator::Evaluator::eval) with
//!     [`Arguments`](evaluator::Arguments). Mismatches between arguments and the
//!     tree come back as [`EvaluationResult::Error`](evaluator::EvaluationResult::Error),
//!     never as a Rust error.
//!
//! ## Branch Semantics
//!
//! Each question binds one argument. A node may name its argument explicitly;
//! otherwise the first argument whose name (underscores read as spaces) occurs
//! in the question text answers it. Branches are then tried in declared order
//! and the first accepting one wins:
//!
//! * `Literal(v)` accepts when the argument equals `v`.
//! * `Comparison { operator, reference }` looks `operator` up in the
//!   [`OperatorRegistry`](operator::OperatorRegistry) and applies it.
//! * `Predicate(p)` accepts when `p(argument)` is true.
//!
//! ## Quick Start
//!
//! ```rust
//! use kettei::prelude::*;
//!
//! let tree: Tree = Node::new("What is the credit score?")
//!     .branch(BranchKey::lt(640), "Rejected - Low credit score")
//!     .branch(
//!         BranchKey::ge(640),
//!         Node::new("What is the income?")
//!             .branch(BranchKey::ge(50_000), "Approved - Strong income and credit score")
//!             .branch(BranchKey::lt(50_000), "Review"),
//!     )
//!     .into();
//!
//! let evaluator = Evaluator::new();
//! evaluator.validate(&tree)?;
//!
//! let args = Arguments::new()
//!     .with("credit_score", 720)
//!     .with("income", 65_000);
//! let result = evaluator.eval(&tree, &args)?;
//!
//! assert_eq!(result.decision(), "Approved");
//! assert_eq!(result.reason(), "Strong income and credit score");
//! assert_eq!(result.path(), [
//!     "Checked credit score: 720 >= 640",
//!     "Checked income: 65000 >= 50000",
//! ]);
//! # Ok::<(), kettei::error::TreeError>(())
//! ```

pub mod error;
pub mod evaluator;
pub mod operator;
pub mod prelude;
pub mod tool;
pub mod trace;
pub mod tree;
