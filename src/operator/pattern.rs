use ahash::AHashMap;
use regex::Regex;
use std::sync::{PoisonError, RwLock};
use tracing::trace;

/// Compiled `regex` references keyed by their source pattern.
///
/// Patterns are anchored on both ends so they only match the whole text.
/// Patterns that fail to compile are not cached.
#[derive(Debug, Default)]
pub(crate) struct PatternCache {
    compiled: RwLock<AHashMap<String, Regex>>,
}

impl PatternCache {
    pub(crate) fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Some(re) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(pattern)
        {
            return Ok(re.clone());
        }

        let re = Regex::new(&format!("^(?:{})$", pattern))?;
        trace!(pattern, "compiled pattern");
        self.compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}
