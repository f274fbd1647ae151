pub mod definition;
pub mod key;
pub mod validate;
pub mod value;

pub use definition::*;
pub use key::*;
pub use validate::validate;
pub use value::*;

use std::fmt;

/// Separator between the decision and the reason in a leaf.
pub const LEAF_SEPARATOR: &str = " - ";

/// Reason reported for leaves that carry no `" - "` separator.
pub const DEFAULT_REASON: &str = "No reason provided";

/// A decision tree: either a question with ordered branches, or a leaf string
/// of the form `"<Decision> - <Reason>"`.
#[derive(Debug, Clone)]
pub enum Tree {
    Node(Node),
    Leaf(String),
}

/// An internal question node.
#[derive(Debug, Clone)]
pub struct Node {
    pub question: String,
    /// The argument this node consumes. When `None`, the argument is found by
    /// matching argument names against the question text.
    pub binding: Option<String>,
    /// Branches in declared order. The first accepting branch wins.
    pub branches: Vec<Branch>,
}

#[derive(Debug, Clone)]
pub struct Branch {
    pub key: BranchKey,
    pub subtree: Tree,
}

impl Node {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            binding: None,
            branches: Vec::new(),
        }
    }

    /// Declares exactly which argument answers this question.
    pub fn bind(mut self, argument: impl Into<String>) -> Self {
        self.binding = Some(argument.into());
        self
    }

    pub fn branch(mut self, key: impl Into<BranchKey>, subtree: impl Into<Tree>) -> Self {
        self.branches.push(Branch {
            key: key.into(),
            subtree: subtree.into(),
        });
        self
    }
}

impl Tree {
    pub fn leaf(text: impl Into<String>) -> Self {
        Tree::Leaf(text.into())
    }

    /// Number of question levels on the longest path.
    pub fn depth(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Node(node) => {
                1 + node
                    .branches
                    .iter()
                    .map(|b| b.subtree.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Node(node) => {
                1 + node
                    .branches
                    .iter()
                    .map(|b| b.subtree.node_count())
                    .sum::<usize>()
            }
        }
    }

    fn fmt_as_tree(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        match self {
            Tree::Leaf(text) => writeln!(f, "{}", text),
            Tree::Node(node) => {
                match &node.binding {
                    Some(arg) => writeln!(f, "{} [{}]", node.question, arg)?,
                    None => writeln!(f, "{}", node.question)?,
                }
                for (i, branch) in node.branches.iter().enumerate() {
                    let is_last = i + 1 == node.branches.len();
                    let marker = if is_last { "└── " } else { "├── " };
                    write!(f, "{}{}{} → ", prefix, marker, branch.key)?;
                    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                    branch.subtree.fmt_as_tree(f, &child_prefix)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(f, "")
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Tree::Node(node)
    }
}

impl From<&str> for Tree {
    fn from(text: &str) -> Self {
        Tree::Leaf(text.to_string())
    }
}

impl From<String> for Tree {
    fn from(text: String) -> Self {
        Tree::Leaf(text)
    }
}

/// A parsed leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub decision: String,
    pub reason: String,
}

impl Verdict {
    /// Splits on the first separator only; anything after it, including further
    /// separators, belongs to the reason.
    pub fn parse(leaf: &str) -> Self {
        match leaf.split_once(LEAF_SEPARATOR) {
            Some((decision, reason)) => Self {
                decision: decision.to_string(),
                reason: reason.to_string(),
            },
            None => Self {
                decision: leaf.to_string(),
                reason: DEFAULT_REASON.to_string(),
            },
        }
    }
}
