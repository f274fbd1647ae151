use crate::error::TreeConversionError;
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt;

// Integral floats below 2^53 print without a fraction; beyond it `as i64` can lose digits or saturate.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Runtime value types used as arguments and branch references.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An enumerated constant, e.g. `LoanPurpose.EDUCATION`.
    Enum { kind: String, variant: String },
    Set(Vec<Value>),
    /// A half-open integer range `[start, end)`.
    Range { start: i64, end: i64 },
}

impl Value {
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn range(start: i64, end: i64) -> Self {
        Value::Range { start, end }
    }

    pub fn enumeration(kind: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum {
            kind: kind.into(),
            variant: variant.into(),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Equality with numeric widening and enum/string coercion.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Value::Enum { variant, .. }, Value::Str(s))
            | (Value::Str(s), Value::Enum { variant, .. }) => variant == s,
            // An enum written without its kind matches that variant of any kind.
            (
                Value::Enum { kind: a, variant: x },
                Value::Enum { kind: b, variant: y },
            ) => x == y && (a == b || a.is_empty() || b.is_empty()),
            (Value::Set(a), Value::Set(b)) => {
                a.iter().all(|x| b.iter().any(|y| x.loose_eq(y)))
                    && b.iter().all(|y| a.iter().any(|x| x.loose_eq(y)))
            }
            _ => self == other,
        }
    }

    /// Orders numbers against numbers and strings against strings.
    /// Every other pairing is incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => self.as_number()?.partial_cmp(&other.as_number()?),
        }
    }

    /// Membership test with `self` as the container. `None` if `self` cannot contain anything.
    pub fn contains(&self, item: &Value) -> Option<bool> {
        match self {
            Value::Set(items) => Some(items.iter().any(|candidate| candidate.loose_eq(item))),
            Value::Range { start, end } => Some(match item {
                Value::Int(i) => start <= i && i < end,
                Value::Float(f) if f.fract() == 0.0 => (*start as f64) <= *f && *f < (*end as f64),
                _ => false,
            }),
            Value::Str(haystack) => Some(match item {
                Value::Str(needle) => haystack.contains(needle.as_str()),
                _ => false,
            }),
            _ => None,
        }
    }

    /// The textual form used for pattern matching: strings raw, everything else via `Display`.
    pub fn as_text(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Converts a JSON value from authored tree data or tool arguments.
    ///
    /// `{"enum": "Kind.VARIANT"}` becomes an [`Value::Enum`]; a bare
    /// `{"enum": "VARIANT"}` has an empty kind and compares by variant alone.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TreeConversionError> {
        use serde_json::Value as Json;
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    TreeConversionError::InvalidValue(format!("unrepresentable number {}", n))
                }),
            },
            Json::String(s) => Ok(Value::Str(s.clone())),
            Json::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Set),
            Json::Object(map) => {
                if let Some(bounds) = map.get("range") {
                    let (start, end) = bounds
                        .as_array()
                        .filter(|b| b.len() == 2)
                        .and_then(|b| Some((b[0].as_i64()?, b[1].as_i64()?)))
                        .ok_or_else(|| {
                            TreeConversionError::InvalidValue(format!(
                                "range expects two integers, found {}",
                                bounds
                            ))
                        })?;
                    Ok(Value::range(start, end))
                } else if let Some(name) = map.get("enum").and_then(|e| e.as_str()) {
                    Ok(match name.rsplit_once('.') {
                        Some((kind, variant)) => Value::enumeration(kind, variant),
                        None => Value::enumeration("", name),
                    })
                } else {
                    Err(TreeConversionError::InvalidValue(format!(
                        "unsupported object {}",
                        json
                    )))
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => {
                if n.fract() == 0.0 && n.abs() < MAX_EXACT_FLOAT_INT {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::Enum { kind, variant } if kind.is_empty() => write!(f, "{}", variant),
            Value::Enum { kind, variant } => write!(f, "{}.{}", kind, variant),
            Value::Set(items) => write!(f, "{{{}}}", items.iter().join(", ")),
            Value::Range { start, end } => write!(f, "range({},{})", start, end),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}
