use crate::error::{EvaluationError, TreeError};
use crate::operator::OperatorRegistry;
use crate::tree::{Node, Tree, Value, Verdict, validate};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, debug_span};

mod arguments;
mod matcher;
mod result;

pub use arguments::{Arguments, label_for};
pub use result::{ERROR_DECISION, EvaluationPath, EvaluationResult};

use matcher::BranchMatcher;

/// Default bound on the number of questions a single evaluation may traverse.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Walks decision trees against named arguments.
///
/// An `Evaluator` holds no per-call state and can be shared across threads.
/// Its operator registry is resolved at match time, so operators registered
/// after a tree was built are honoured on the next evaluation.
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: Arc<OperatorRegistry>,
    max_depth: usize,
}

pub struct EvaluatorBuilder {
    registry: Option<Arc<OperatorRegistry>>,
    max_depth: usize,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Uses a shared registry instead of a fresh one seeded with the defaults.
    pub fn registry(mut self, registry: Arc<OperatorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(OperatorRegistry::with_defaults())),
            max_depth: self.max_depth,
        }
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        EvaluatorBuilder::new().build()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn registry(&self) -> &Arc<OperatorRegistry> {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Checks `tree` for authoring defects against this evaluator's registry.
    pub fn validate(&self, tree: &Tree) -> Result<(), TreeError> {
        validate(tree, &self.registry, self.max_depth)
    }

    /// Evaluates `tree` against `args`.
    ///
    /// # Returns
    ///
    /// * `Ok(EvaluationResult::Success)`: a leaf was reached.
    /// * `Ok(EvaluationResult::Error)`: no argument answered a question, or no
    ///   branch accepted the argument's value. The path holds every question
    ///   answered before the mismatch.
    /// * `Err(TreeError)`: the tree is defective (unregistered operator, a
    ///   `regex` reference that does not compile, or deeper than the
    ///   configured maximum).
    pub fn eval(&self, tree: &Tree, args: &Arguments) -> Result<EvaluationResult, TreeError> {
        let _span = debug_span!("eval", arguments = args.len()).entered();
        let matcher = BranchMatcher::new(&self.registry);
        let mut path = EvaluationPath::new();
        let mut current = tree;

        loop {
            let node = match current {
                Tree::Leaf(text) => {
                    let Verdict { decision, reason } = Verdict::parse(text);
                    debug!(%decision, steps = path.len(), "reached leaf");
                    return Ok(EvaluationResult::Success {
                        decision,
                        reason,
                        path,
                    });
                }
                Tree::Node(node) => node,
            };

            if path.len() >= self.max_depth {
                return Err(TreeError::DepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            let Some((label, value)) = bind_argument(node, args) else {
                debug!(question = %node.question, "no argument answers question");
                return Ok(EvaluationResult::Error {
                    error: EvaluationError::NoMatchingArgument {
                        question: node.question.clone(),
                    },
                    path,
                });
            };

            match matcher.find_match(node, value, &label, &mut path)? {
                Some(branch) => current = &branch.subtree,
                None => {
                    debug!(%label, %value, "no branch accepts value");
                    return Ok(EvaluationResult::Error {
                        error: EvaluationError::NoMatchingBranch {
                            label,
                            value: value.clone(),
                        },
                        path,
                    });
                }
            }
        }
    }

    /// Evaluates many argument sets in parallel. Results keep the input order.
    pub fn eval_batch(
        &self,
        tree: &Tree,
        batch: &[Arguments],
    ) -> Vec<Result<EvaluationResult, TreeError>> {
        batch.par_iter().map(|args| self.eval(tree, args)).collect()
    }
}

/// Picks the argument answering `node`: its declared binding if it has one,
/// otherwise the first argument whose label appears in the question text.
fn bind_argument<'a>(node: &Node, args: &'a Arguments) -> Option<(String, &'a Value)> {
    match &node.binding {
        Some(name) => args.get(name).map(|value| (label_for(name), value)),
        None => args.iter().find_map(|(name, value)| {
            let label = label_for(name);
            node.question.contains(&label).then_some((label, value))
        }),
    }
}
