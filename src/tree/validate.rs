use super::{BranchKey, Tree};
use crate::error::TreeError;
use crate::operator::{OperatorRegistry, REGEX_OPERATOR};

/// Checks a tree for authoring defects before it is deployed.
///
/// Overlapping comparison branches are accepted: branches are tried in
/// declared order and the first one that accepts the value wins.
pub fn validate(tree: &Tree, registry: &OperatorRegistry, max_depth: usize) -> Result<(), TreeError> {
    validate_recursive(tree, registry, max_depth, 0)
}

fn validate_recursive(
    tree: &Tree,
    registry: &OperatorRegistry,
    max_depth: usize,
    depth: usize,
) -> Result<(), TreeError> {
    let node = match tree {
        Tree::Leaf(_) => return Ok(()),
        Tree::Node(node) => node,
    };
    if depth >= max_depth {
        return Err(TreeError::DepthExceeded { max_depth });
    }
    if node.branches.is_empty() {
        return Err(TreeError::EmptyBranches {
            question: node.question.clone(),
        });
    }

    for branch in &node.branches {
        if let BranchKey::Comparison {
            operator,
            reference,
        } = &branch.key
        {
            registry.lookup(operator)?;
            if operator == REGEX_OPERATOR {
                let pattern = reference.as_text();
                registry.compile_pattern(&pattern).map_err(|e| {
                    TreeError::InvalidPattern {
                        question: node.question.clone(),
                        pattern,
                        message: e.to_string(),
                    }
                })?;
            }
        }
        validate_recursive(&branch.subtree, registry, max_depth, depth + 1)?;
    }
    Ok(())
}
