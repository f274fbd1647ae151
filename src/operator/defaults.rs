use super::OperatorRegistry;
use crate::tree::Value;
use std::cmp::Ordering;
use std::sync::Arc;

pub const REGEX_OPERATOR: &str = "regex";

// Registers an ordering operator that accepts when the comparison yields one of the listed orderings.
macro_rules! ordering_op {
    ($registry:ident, $symbol:expr, $($ord:pat_param)|+) => {
        $registry.register($symbol, |a: &Value, b: &Value| {
            matches!(a.compare(b), Some($($ord)|+))
        })
    };
}

pub(super) fn register_default_operators(registry: &OperatorRegistry) {
    registry.register("==", |a: &Value, b: &Value| a.loose_eq(b));
    registry.register("!=", |a: &Value, b: &Value| !a.loose_eq(b));

    ordering_op!(registry, ">", Ordering::Greater);
    ordering_op!(registry, ">=", Ordering::Greater | Ordering::Equal);
    ordering_op!(registry, "<", Ordering::Less);
    ordering_op!(registry, "<=", Ordering::Less | Ordering::Equal);

    registry.register("in", |a: &Value, b: &Value| b.contains(a).unwrap_or(false));
    registry.register("not in", |a: &Value, b: &Value| {
        b.contains(a).is_some_and(|found| !found)
    });

    // The matcher compiles the pattern before applying this operator, so a
    // pattern that fails here was already reported as `InvalidPattern`.
    let patterns = Arc::clone(&registry.patterns);
    registry.register(REGEX_OPERATOR, move |a: &Value, b: &Value| {
        patterns
            .compile(&b.as_text())
            .is_ok_and(|re| re.is_match(&a.as_text()))
    });
}
