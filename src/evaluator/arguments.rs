use crate::error::TreeConversionError;
use crate::tree::Value;

/// Named argument values in caller order.
///
/// Order matters: when several argument names appear in the same question,
/// the one supplied first answers it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Vec<(String, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name`, keeping its original position if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds arguments from a JSON object, keeping its key order.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TreeConversionError> {
        let object = json.as_object().ok_or_else(|| {
            TreeConversionError::InvalidValue(format!("arguments must be a JSON object, found {}", json))
        })?;
        object
            .iter()
            .map(|(name, value)| Ok((name.clone(), Value::from_json(value)?)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Arguments
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Arguments::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

/// Normalizes an argument name into the label matched against question text.
pub fn label_for(name: &str) -> String {
    name.replace('_', " ")
}
