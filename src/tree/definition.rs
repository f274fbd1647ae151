use super::{BranchKey, Node, Predicate, Tree, Value};
use crate::error::TreeConversionError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The JSON form of a statically authored tree.
///
/// A leaf is a plain string, a question is an object:
///
/// ```json
/// {
///   "question": "What is the credit score?",
///   "branches": [
///     { "when": { "compare": { "op": "<", "value": 640 } }, "then": "Rejected - Low credit score" },
///     { "when": { "compare": { "op": ">=", "value": 640 } }, "then": "Approved" }
///   ]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum TreeDefinition {
    Leaf(String),
    Node(NodeDefinition),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NodeDefinition {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    pub branches: Vec<BranchDefinition>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BranchDefinition {
    pub when: KeyDefinition,
    pub then: TreeDefinition,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum KeyDefinition {
    Literal(serde_json::Value),
    Compare { op: String, value: serde_json::Value },
    /// Refers to a predicate by name in the [`PredicateCatalog`].
    Predicate(String),
}

impl TreeDefinition {
    pub fn from_json(json: &str) -> Result<Self, TreeConversionError> {
        serde_json::from_str(json).map_err(|e| TreeConversionError::JsonParseError(e.to_string()))
    }
}

/// Named predicates that JSON trees may refer to.
#[derive(Debug, Clone, Default)]
pub struct PredicateCatalog {
    predicates: AHashMap<String, Predicate>,
}

impl PredicateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.insert(Predicate::new(name, func));
        self
    }

    pub fn insert(&mut self, predicate: Predicate) {
        self.predicates
            .insert(predicate.name().to_string(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }
}

/// A trait for authored data models that can be converted into a [`Tree`].
///
/// This is the extension point for loading trees from formats other than the
/// built-in JSON one. Closures cannot be serialized, so predicate branches are
/// resolved by name through a [`PredicateCatalog`].
pub trait IntoTree {
    fn into_tree(self, predicates: &PredicateCatalog) -> Result<Tree, TreeConversionError>;
}

impl IntoTree for TreeDefinition {
    fn into_tree(self, predicates: &PredicateCatalog) -> Result<Tree, TreeConversionError> {
        match self {
            TreeDefinition::Leaf(text) => Ok(Tree::Leaf(text)),
            TreeDefinition::Node(def) => {
                let mut node = Node::new(def.question);
                node.binding = def.bind;
                for branch in def.branches {
                    let key = match branch.when {
                        KeyDefinition::Literal(v) => BranchKey::Literal(Value::from_json(&v)?),
                        KeyDefinition::Compare { op, value } => BranchKey::Comparison {
                            operator: op,
                            reference: Value::from_json(&value)?,
                        },
                        KeyDefinition::Predicate(name) => predicates
                            .get(&name)
                            .cloned()
                            .map(BranchKey::Predicate)
                            .ok_or(TreeConversionError::UnknownPredicate(name))?,
                    };
                    node = node.branch(key, branch.then.into_tree(predicates)?);
                }
                Ok(Tree::Node(node))
            }
        }
    }
}
