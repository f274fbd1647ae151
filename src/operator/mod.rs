use crate::error::TreeError;
use crate::tree::Value;
use ahash::AHashMap;
use itertools::Itertools;
use regex::Regex;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

mod defaults;
mod pattern;

pub use defaults::REGEX_OPERATOR;
use pattern::PatternCache;

/// A binary predicate applied as `operator(argument, reference)`.
pub type Operator = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// The lookup table from operator symbol to binary predicate.
///
/// Lookups take a read lock and registrations a write lock, so one registry can
/// be shared behind an `Arc` by evaluators running on many threads while new
/// operators are still being added.
pub struct OperatorRegistry {
    operators: RwLock<AHashMap<String, Operator>>,
    patterns: Arc<PatternCache>,
}

impl OperatorRegistry {
    /// A registry with no operators at all.
    pub fn empty() -> Self {
        Self {
            operators: RwLock::new(AHashMap::new()),
            patterns: Arc::new(PatternCache::default()),
        }
    }

    /// A registry seeded with `==, !=, >, >=, <, <=, in, not in, regex`.
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        defaults::register_default_operators(&registry);
        registry
    }

    /// Installs `predicate` under `symbol`, replacing any earlier registration.
    pub fn register<F>(&self, symbol: impl Into<String>, predicate: F)
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        let symbol = symbol.into();
        debug!(symbol = %symbol, "registering operator");
        self.operators
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol, Arc::new(predicate));
    }

    pub fn lookup(&self, symbol: &str) -> Result<Operator, TreeError> {
        self.operators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .cloned()
            .ok_or_else(|| TreeError::UnsupportedOperator {
                symbol: symbol.to_string(),
            })
    }

    /// Resolves `symbol` and applies it to `(value, reference)`.
    pub fn apply(&self, symbol: &str, value: &Value, reference: &Value) -> Result<bool, TreeError> {
        let operator = self.lookup(symbol)?;
        Ok(operator(value, reference))
    }

    /// Compiles a `regex` reference as a full-string match, reusing earlier compilations.
    pub fn compile_pattern(&self, pattern: &str) -> Result<Regex, regex::Error> {
        self.patterns.compile(pattern)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.operators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(symbol)
    }

    /// All registered symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.operators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .sorted()
            .collect()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("symbols", &self.symbols())
            .finish()
    }
}
