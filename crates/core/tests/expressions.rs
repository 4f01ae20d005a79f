//! Cross-module expression tests: the textual language, the JSON wire
//! form, and evaluation agreeing with each other.

use serde_json::json;
use switchyard_core::{
    evaluate, evaluate_rules, expr_from_json, expr_to_json, parse, BinOp, Expr, Metadata, Rule,
    Value,
};

/// Sources paired with the metadata that should turn them on.
fn truthy_cases() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        (
            r#"userType == "admin""#,
            json!({ "userType": "admin" }),
        ),
        (
            r#"userType == "admin" && (beta || score > 10)"#,
            json!({ "userType": "admin", "beta": false, "score": 25 }),
        ),
        (
            r#"!(plan == "free") || trialDays > 0"#,
            json!({ "plan": "pro", "trialDays": 0 }),
        ),
        (
            "signups >= 1_000",
            json!({ "signups": 1000 }),
        ),
        (
            "ratio <= 0.5",
            json!({ "ratio": 0.25 }),
        ),
    ]
}

#[test]
fn parsed_sources_evaluate_as_expected() {
    for (src, raw) in truthy_cases() {
        let expr = parse(src).unwrap();
        let metadata = Metadata::from_json(&raw);
        assert_eq!(
            evaluate(&expr, &metadata),
            Value::Bool(true),
            "expected {:?} to hold under {}",
            src,
            raw
        );
    }
}

#[test]
fn parsed_sources_round_trip_through_the_wire() {
    for (src, raw) in truthy_cases() {
        let expr = parse(src).unwrap();
        let metadata = Metadata::from_json(&raw);

        let decoded = expr_from_json(&expr_to_json(&expr)).unwrap();
        assert_eq!(
            evaluate(&decoded, &metadata),
            evaluate(&expr, &metadata),
            "wire round trip changed the meaning of {:?}",
            src
        );

        // And through serde, as a rule list would be stored.
        let stored = serde_json::to_string(&expr).unwrap();
        let reloaded: Expr = serde_json::from_str(&stored).unwrap();
        assert_eq!(evaluate(&reloaded, &metadata), Value::Bool(true));
    }
}

#[test]
fn rule_lists_survive_storage_and_keep_their_order() {
    // An order-sensitive rule list as it would live in a toggle's rules
    // column: the trailing || rescues the chain, so reversing it flips
    // the decision.
    let rules = vec![
        Rule::new(BinOp::And, parse("x == 1").unwrap()),
        Rule::new(BinOp::Or, parse("y == 2").unwrap()),
    ];
    let stored = serde_json::to_string(&rules).unwrap();
    let reloaded: Vec<Rule> = serde_json::from_str(&stored).unwrap();

    let metadata = Metadata::from_json(&json!({ "x": 5, "y": 2 }));
    assert!(evaluate_rules(&metadata, &reloaded));

    let mut swapped = reloaded;
    swapped.reverse();
    assert!(!evaluate_rules(&metadata, &swapped));
}

#[test]
fn typoed_ident_silently_disables_a_clause() {
    // "userTpye" is not in the context, so the clause is just false --
    // the documented (and pinned) failure mode of the missing-ident
    // fallback.
    let expr = parse(r#"userTpye == "admin""#).unwrap();
    let metadata = Metadata::from_json(&json!({ "userType": "admin" }));
    assert_eq!(evaluate(&expr, &metadata), Value::Bool(false));
}
