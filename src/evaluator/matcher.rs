use crate::error::TreeError;
use crate::operator::{OperatorRegistry, REGEX_OPERATOR};
use crate::tree::{Branch, BranchKey, Node, Value};
use tracing::trace;

/// Finds the first branch whose key accepts a value.
pub(super) struct BranchMatcher<'a> {
    registry: &'a OperatorRegistry,
}

impl<'a> BranchMatcher<'a> {
    pub(super) fn new(registry: &'a OperatorRegistry) -> Self {
        Self { registry }
    }

    /// Tries the branches of `node` in declared order and returns the first
    /// match, appending one explanation line to `path` for it. The path is left
    /// untouched when nothing matches. An unregistered operator or a `regex`
    /// reference that does not compile aborts the search.
    pub(super) fn find_match<'b>(
        &self,
        node: &'b Node,
        value: &Value,
        label: &str,
        path: &mut Vec<String>,
    ) -> Result<Option<&'b Branch>, TreeError> {
        for branch in &node.branches {
            let explanation = match &branch.key {
                BranchKey::Predicate(predicate) => predicate
                    .test(value)
                    .then(|| format!("Checked {}: predicate {} → True", label, predicate.name())),
                BranchKey::Comparison {
                    operator,
                    reference,
                } => {
                    if operator == REGEX_OPERATOR {
                        self.check_pattern(node, reference)?;
                    }
                    self.registry
                        .apply(operator, value, reference)?
                        .then(|| format!("Checked {}: {} {} {}", label, value, operator, reference))
                }
                BranchKey::Literal(key) => value
                    .loose_eq(key)
                    .then(|| format!("Checked {}: {} == {}", label, value, key)),
            };

            match explanation {
                Some(line) => {
                    trace!(%label, step = %line, "branch matched");
                    path.push(line);
                    return Ok(Some(branch));
                }
                None => trace!(%label, key = %branch.key, %value, "branch rejected"),
            }
        }
        Ok(None)
    }

    fn check_pattern(&self, node: &Node, reference: &Value) -> Result<(), TreeError> {
        let pattern = reference.as_text();
        match self.registry.compile_pattern(&pattern) {
            Ok(_) => Ok(()),
            Err(e) => Err(TreeError::InvalidPattern {
                question: node.question.clone(),
                pattern,
                message: e.to_string(),
            }),
        }
    }
}
