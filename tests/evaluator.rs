//! Tests for tree traversal, branch matching and the path trace.
mod common;
use common::*;
use kettei::prelude::*;
use std::sync::Arc;

#[test]
fn test_loan_tree_approves_strong_applicant() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("credit_score", 720)
        .with("income", 65000)
        .with("requested_amount", 5000);

    let result = evaluator.eval(&loan_tree(), &args).unwrap();
    assert!(result.is_success());
    assert_eq!(result.decision(), "Approved");
    assert_eq!(result.reason(), "Strong income and credit score");
    assert_eq!(result.error(), None);
    assert_eq!(result.path().len(), 2);
    assert_eq!(
        result.path(),
        [
            "Checked credit score: 720 >= 640",
            "Checked income: 65000 >= 50000",
        ]
    );
}

#[test]
fn test_loan_tree_falls_through_to_requested_amount() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("credit_score", 700)
        .with("income", 30000)
        .with("requested_amount", 25000);

    let result = evaluator.eval(&loan_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Rejected");
    assert_eq!(result.reason(), "Income too low for requested amount");
    assert_eq!(result.path().len(), 3);
    assert_eq!(result.path()[2], "Checked requested amount: 25000 > 10000");
}

#[test]
fn test_blood_pressure_elevated() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("systolic_blood_pressure", 128)
        .with("diastolic_blood_pressure", 78);

    let result = evaluator.eval(&blood_pressure_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Elevated blood pressure");
    assert_eq!(result.reason(), "Adopt heart-healthy lifestyle");
    assert_eq!(
        result.path(),
        [
            "Checked diastolic blood pressure: 78 < 120",
            "Checked systolic blood pressure: 128 in range(120,130)",
        ]
    );
}

#[test]
fn test_blood_pressure_range_upper_bound_is_exclusive() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("systolic_blood_pressure", 130)
        .with("diastolic_blood_pressure", 85);

    let result = evaluator.eval(&blood_pressure_tree(), &args).unwrap();
    assert_eq!(result.decision(), "High blood pressure (stage 1)");
}

#[test]
fn test_enhanced_tree_domestic_study() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("purpose", Value::enumeration("LoanPurpose", "EDUCATION"))
        .with("country", "US")
        .with("credit_score", 720);

    let result = evaluator.eval(&enhanced_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Approved");
    assert_eq!(result.reason(), "Domestic study");
    assert_eq!(
        result.path(),
        [
            "Checked purpose: LoanPurpose.EDUCATION == LoanPurpose.EDUCATION",
            "Checked country: US in {US, CA}",
            "Checked credit score: 720 >= 650",
        ]
    );
}

#[test]
fn test_enhanced_tree_accepts_enum_variant_as_string() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("purpose", "EDUCATION")
        .with("country", "DE")
        .with("credit_score", 720);

    let result = evaluator.eval(&enhanced_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Review");
    assert_eq!(
        result.reason(),
        "International study requires additional documents"
    );
    assert_eq!(result.path()[1], "Checked country: DE regex [A-Z]{2}");
}

#[test]
fn test_predicate_branch_records_predicate_name() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("purpose", Value::enumeration("LoanPurpose", "HOME"))
        .with("credit_score", 710);

    let result = evaluator.eval(&enhanced_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Approved");
    assert_eq!(result.path()[1], "Checked credit score: predicate prime → True");
}

#[test]
fn test_not_in_branch_catches_other_purposes() {
    let evaluator = Evaluator::new();
    let args = Arguments::new().with("purpose", Value::enumeration("LoanPurpose", "CAR"));

    let result = evaluator.eval(&enhanced_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Review");
    assert_eq!(result.reason(), "No reason provided");
    assert_eq!(result.path().len(), 1);
}

#[test]
fn test_no_matching_argument_is_reported_as_error_result() {
    let evaluator = Evaluator::new();
    let args = Arguments::new().with("temperature", 38.5).with("age", 40);

    let result = evaluator.eval(&loan_tree(), &args).unwrap();
    assert!(!result.is_success());
    assert_eq!(result.decision(), "Error");
    assert_eq!(
        result.reason(),
        "Question 'What is the credit score?' could not be answered with supplied arguments"
    );
    assert!(result.path().is_empty());
    assert_eq!(
        result.error(),
        Some(&EvaluationError::NoMatchingArgument {
            question: "What is the credit score?".to_string()
        })
    );
}

#[test]
fn test_no_matching_branch_keeps_partial_path() {
    let evaluator = Evaluator::new();
    let args = Arguments::new()
        .with("credit_score", 720)
        .with("income", "plenty");

    let result = evaluator.eval(&loan_tree(), &args).unwrap();
    assert_eq!(result.decision(), "Error");
    assert_eq!(result.reason(), "Invalid value for income: plenty");
    assert_eq!(result.path(), ["Checked credit score: 720 >= 640"]);
}

#[test]
fn test_missing_deeper_argument_reports_question() {
    let evaluator = Evaluator::new();
    let args = Arguments::new().with("credit_score", 720);

    let result = evaluator.eval(&loan_tree(), &args).unwrap();
    assert_eq!(
        result.reason(),
        "Question 'What is the annual income?' could not be answered with supplied arguments"
    );
    assert_eq!(result.path().len(), 1);
}

#[test]
fn test_literal_branches() {
    let tree: Tree = Node::new("What is the ticket priority?")
        .branch(BranchKey::literal("low"), "Backlog - Handle when convenient")
        .branch(BranchKey::literal("high"), "Escalate - Page the on-call engineer")
        .into();
    let evaluator = Evaluator::new();

    let result = evaluator
        .eval(&tree, &Arguments::new().with("ticket_priority", "high"))
        .unwrap();
    assert_eq!(result.decision(), "Escalate");
    assert_eq!(result.path(), ["Checked ticket priority: high == high"]);

    let result = evaluator
        .eval(&tree, &Arguments::new().with("ticket_priority", "urgent"))
        .unwrap();
    assert_eq!(result.reason(), "Invalid value for ticket priority: urgent");
}

#[test]
fn test_first_matching_branch_wins_over_later_overlap() {
    let tree: Tree = Node::new("What is the score?")
        .branch(BranchKey::ge(600), "Silver")
        .branch(BranchKey::ge(700), "Gold")
        .into();

    let result = Evaluator::new()
        .eval(&tree, &Arguments::new().with("score", 750))
        .unwrap();
    assert_eq!(result.decision(), "Silver");
}

#[test]
fn test_first_argument_in_caller_order_answers_question() {
    let tree: Tree = Node::new("What is the home loan amount?")
        .branch(BranchKey::ge(0), "Accepted")
        .into();
    let evaluator = Evaluator::new();

    let result = evaluator
        .eval(&tree, &Arguments::new().with("loan", 1).with("home_loan", 2))
        .unwrap();
    assert_eq!(result.path(), ["Checked loan: 1 >= 0"]);

    let result = evaluator
        .eval(&tree, &Arguments::new().with("home_loan", 2).with("loan", 1))
        .unwrap();
    assert_eq!(result.path(), ["Checked home loan: 2 >= 0"]);
}

#[test]
fn test_explicit_binding_overrides_question_text() {
    let tree: Tree = Node::new("What is the score?")
        .bind("credit_score")
        .branch(BranchKey::ge(640), "Approved")
        .branch(BranchKey::lt(640), "Rejected")
        .into();
    let evaluator = Evaluator::new();

    let result = evaluator
        .eval(&tree, &Arguments::new().with("score", 100).with("credit_score", 720))
        .unwrap();
    assert_eq!(result.decision(), "Approved");
    assert_eq!(result.path(), ["Checked credit score: 720 >= 640"]);

    let result = evaluator
        .eval(&tree, &Arguments::new().with("score", 720))
        .unwrap();
    assert_eq!(
        result.reason(),
        "Question 'What is the score?' could not be answered with supplied arguments"
    );
}

#[test]
fn test_unsupported_operator_is_fatal() {
    let tree: Tree = Node::new("What is the count?")
        .branch(BranchKey::compare("~=", 5), "Close enough")
        .into();

    let err = Evaluator::new()
        .eval(&tree, &Arguments::new().with("count", 5))
        .unwrap_err();
    assert_eq!(
        err,
        TreeError::UnsupportedOperator {
            symbol: "~=".to_string()
        }
    );
}

#[test]
fn test_invalid_pattern_is_fatal_without_validation() {
    let tree: Tree = Node::new("What is the country code?")
        .branch(BranchKey::matches("[A-Z"), "Strict - well formed code")
        .branch(BranchKey::ne(""), "Fallback - catch all")
        .into();

    let err = Evaluator::new()
        .eval(&tree, &Arguments::new().with("country_code", "AB"))
        .unwrap_err();
    match err {
        TreeError::InvalidPattern {
            question, pattern, ..
        } => {
            assert_eq!(question, "What is the country code?");
            assert_eq!(pattern, "[A-Z");
        }
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn test_operator_registered_after_tree_construction() {
    let registry = Arc::new(OperatorRegistry::with_defaults());
    let evaluator = Evaluator::builder().registry(registry.clone()).build();
    let tree: Tree = Node::new("How many items are in the order?")
        .branch(BranchKey::compare("divisible_by", 6), "Full crates")
        .branch(BranchKey::ge(0), "Partial crates")
        .into();
    let args = Arguments::new().with("items", 12);

    assert!(evaluator.eval(&tree, &args).is_err());

    registry.register("divisible_by", |a: &Value, b: &Value| match (a, b) {
        (Value::Int(a), Value::Int(b)) => *b != 0 && a % b == 0,
        _ => false,
    });

    let result = evaluator.eval(&tree, &args).unwrap();
    assert_eq!(result.decision(), "Full crates");
    assert_eq!(result.path(), ["Checked items: 12 divisible_by 6"]);
}

fn chain(depth: usize) -> Tree {
    let mut tree = Tree::leaf("Done - Reached the bottom");
    for _ in 0..depth {
        tree = Node::new("What is the level?").branch(BranchKey::ge(0), tree).into();
    }
    tree
}

#[test]
fn test_depth_guard() {
    let args = Arguments::new().with("level", 1);

    let shallow = Evaluator::builder().max_depth(3).build();
    assert_eq!(
        shallow.eval(&chain(5), &args).unwrap_err(),
        TreeError::DepthExceeded { max_depth: 3 }
    );

    let deep = Evaluator::builder().max_depth(5).build();
    let result = deep.eval(&chain(5), &args).unwrap();
    assert_eq!(result.decision(), "Done");
    assert_eq!(result.path().len(), 5);
}

#[test]
fn test_leaf_at_root() {
    let tree = Tree::leaf("Approved - Everyone qualifies");
    let result = Evaluator::new().eval(&tree, &Arguments::new()).unwrap();
    assert_eq!(result.decision(), "Approved");
    assert_eq!(result.reason(), "Everyone qualifies");
    assert!(result.path().is_empty());
}

#[test]
fn test_evaluator_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Evaluator>();
    assert_send_sync::<Tree>();

    let evaluator = Evaluator::new();
    let tree = loan_tree();
    std::thread::scope(|scope| {
        for score in [500, 700] {
            let (evaluator, tree) = (&evaluator, &tree);
            scope.spawn(move || {
                let args = Arguments::new().with("credit_score", score).with("income", 90000);
                let result = evaluator.eval(tree, &args).unwrap();
                let expected = if score < 640 { "Rejected" } else { "Approved" };
                assert_eq!(result.decision(), expected);
            });
        }
    });
}
