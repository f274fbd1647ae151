use crate::evaluator::EvaluationResult;

/// Formats evaluation results into human-readable explanations
pub struct TraceFormatter;

impl TraceFormatter {
    /// Renders the decision, the reason and a numbered list of the path taken.
    pub fn format_result(result: &EvaluationResult) -> String {
        let mut out = String::new();
        out.push_str(&format!("Decision: {}\n", result.decision()));
        out.push_str(&format!("Reason:   {}\n", result.reason()));
        out.push_str(&Self::format_path(result.path()));
        out
    }

    /// One numbered line per step, or a placeholder when nothing was checked.
    pub fn format_path(path: &[String]) -> String {
        if path.is_empty() {
            return "Path:     (no questions answered)\n".to_string();
        }
        let mut out = String::from("Path:\n");
        for (i, step) in path.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, step));
        }
        out
    }
}
