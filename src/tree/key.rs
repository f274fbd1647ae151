use super::Value;
use std::fmt;
use std::sync::Arc;

/// A named unary predicate over an argument value.
#[derive(Clone)]
pub struct Predicate {
    name: String,
    func: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.func)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// The discriminator attached to each child of a question node.
#[derive(Debug, Clone)]
pub enum BranchKey {
    /// Matches when the argument equals the value.
    Literal(Value),
    /// Matches when the registered operator accepts `(argument, reference)`.
    /// The operator symbol is resolved at match time, not at construction.
    Comparison { operator: String, reference: Value },
    /// Matches when the predicate returns `true` for the argument.
    Predicate(Predicate),
}

impl BranchKey {
    pub fn literal(value: impl Into<Value>) -> Self {
        BranchKey::Literal(value.into())
    }

    pub fn compare(operator: impl Into<String>, reference: impl Into<Value>) -> Self {
        BranchKey::Comparison {
            operator: operator.into(),
            reference: reference.into(),
        }
    }

    pub fn predicate<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        BranchKey::Predicate(Predicate::new(name, func))
    }

    pub fn eq(reference: impl Into<Value>) -> Self {
        Self::compare("==", reference)
    }

    pub fn ne(reference: impl Into<Value>) -> Self {
        Self::compare("!=", reference)
    }

    pub fn gt(reference: impl Into<Value>) -> Self {
        Self::compare(">", reference)
    }

    pub fn ge(reference: impl Into<Value>) -> Self {
        Self::compare(">=", reference)
    }

    pub fn lt(reference: impl Into<Value>) -> Self {
        Self::compare("<", reference)
    }

    pub fn le(reference: impl Into<Value>) -> Self {
        Self::compare("<=", reference)
    }

    pub fn is_in(reference: impl Into<Value>) -> Self {
        Self::compare("in", reference)
    }

    pub fn not_in(reference: impl Into<Value>) -> Self {
        Self::compare("not in", reference)
    }

    /// Full-string regex match of the argument's text against `pattern`.
    pub fn matches(pattern: impl Into<String>) -> Self {
        Self::compare("regex", Value::Str(pattern.into()))
    }
}

impl From<Predicate> for BranchKey {
    fn from(p: Predicate) -> Self {
        BranchKey::Predicate(p)
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKey::Literal(v) => write!(f, "== {}", v),
            BranchKey::Comparison {
                operator,
                reference,
            } => write!(f, "{} {}", operator, reference),
            BranchKey::Predicate(p) => write!(f, "predicate {}", p.name),
        }
    }
}
