//! Common test fixtures: the trees used across the test suites.
use kettei::prelude::*;

/// Loan approval tree.
///
/// Logic: credit score < 640 rejects; otherwise income >= 50000 approves, and
/// lower incomes fall through to the requested amount.
#[allow(dead_code)]
pub fn loan_tree() -> Tree {
    Node::new("What is the credit score?")
        .branch(BranchKey::lt(640), "Rejected - Low credit score")
        .branch(
            BranchKey::ge(640),
            Node::new("What is the annual income?")
                .branch(BranchKey::ge(50_000), "Approved - Strong income and credit score")
                .branch(
                    BranchKey::lt(50_000),
                    Node::new("What is the requested amount?")
                        .branch(
                            BranchKey::le(10_000),
                            "Approved - Small loan within income limits",
                        )
                        .branch(
                            BranchKey::gt(10_000),
                            "Rejected - Income too low for requested amount",
                        ),
                ),
        )
        .into()
}

/// Blood pressure classification tree, diastolic crisis check first.
#[allow(dead_code)]
pub fn blood_pressure_tree() -> Tree {
    Node::new("What is the diastolic blood pressure?")
        .branch(
            BranchKey::ge(120),
            "Hypertensive crisis - Seek emergency care immediately",
        )
        .branch(
            BranchKey::lt(120),
            Node::new("What is the systolic blood pressure?")
                .branch(
                    BranchKey::ge(180),
                    "Hypertensive crisis - Seek emergency care immediately",
                )
                .branch(
                    BranchKey::is_in(Value::range(140, 180)),
                    "High blood pressure (stage 2) - Consult a doctor about medication",
                )
                .branch(
                    BranchKey::is_in(Value::range(130, 140)),
                    "High blood pressure (stage 1) - Lifestyle changes and possible medication",
                )
                .branch(
                    BranchKey::is_in(Value::range(120, 130)),
                    "Elevated blood pressure - Adopt heart-healthy lifestyle",
                )
                .branch(BranchKey::lt(120), "Normal - Maintain healthy habits"),
        )
        .into()
}

/// Loan tree mixing enum literals, set membership, regex and a predicate.
#[allow(dead_code)]
pub fn enhanced_tree() -> Tree {
    let credit_check = Node::new("What is the credit score?")
        .branch(BranchKey::ge(650), "Approved - Domestic study")
        .branch(BranchKey::lt(650), "Review - Cosigner required");

    Node::new("What is the loan purpose?")
        .branch(
            BranchKey::literal(Value::enumeration("LoanPurpose", "EDUCATION")),
            Node::new("Which country is the applicant studying in?")
                .branch(BranchKey::is_in(Value::set(["US", "CA"])), credit_check)
                .branch(
                    BranchKey::matches("[A-Z]{2}"),
                    "Review - International study requires additional documents",
                ),
        )
        .branch(
            BranchKey::literal(Value::enumeration("LoanPurpose", "HOME")),
            Node::new("What is the credit score?").branch(
                BranchKey::predicate("prime", |v| {
                    matches!(v.compare(&Value::Int(700)), Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal))
                }),
                "Approved - Mortgage eligible",
            )
            .branch(BranchKey::lt(700), "Rejected - Credit score below mortgage threshold"),
        )
        .branch(
            BranchKey::not_in(Value::set([
                Value::enumeration("LoanPurpose", "EDUCATION"),
                Value::enumeration("LoanPurpose", "HOME"),
            ])),
            "Review",
        )
        .into()
}

/// Loads one of the JSON trees shipped in `trees/`.
#[allow(dead_code)]
pub fn load_json_tree(json: &str) -> Tree {
    TreeDefinition::from_json(json)
        .and_then(|def| def.into_tree(&PredicateCatalog::new()))
        .expect("tree JSON should load")
}
