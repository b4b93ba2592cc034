use serde_json::json;

use super::text;
use crate::core::services::ConditionService;
use crate::domain::{ConditionOperator, ConditionalRule, FormValues};

fn values(pairs: &[(&str, serde_json::Value)]) -> FormValues {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn absent_rule_is_always_visible() {
    assert!(ConditionService::evaluate_visibility(None, &FormValues::new()));
}

#[test]
fn rule_without_target_is_visible() {
    let rule = ConditionalRule::new("", ConditionOperator::Equals, "yes");
    assert!(ConditionService::evaluate_visibility(Some(&rule), &FormValues::new()));
}

#[test]
fn equals_trims_and_ignores_case() {
    let rule = ConditionalRule::new("pet", ConditionOperator::Equals, " Dog ");
    assert!(ConditionService::evaluate_visibility(
        Some(&rule),
        &values(&[("pet", json!("dog  "))])
    ));
    assert!(!ConditionService::evaluate_visibility(
        Some(&rule),
        &values(&[("pet", json!("cat"))])
    ));
}

#[test]
fn not_equals_and_contains() {
    let not_equals = ConditionalRule::new("pet", ConditionOperator::NotEquals, "dog");
    let contains = ConditionalRule::new("pet", ConditionOperator::Contains, "AT");
    let current = values(&[("pet", json!("Cat"))]);
    assert!(ConditionService::evaluate_visibility(Some(&not_equals), &current));
    assert!(ConditionService::evaluate_visibility(Some(&contains), &current));
}

#[test]
fn emptiness_checks_treat_missing_and_blank_alike() {
    let is_empty = ConditionalRule::new("notes", ConditionOperator::IsEmpty, "");
    let is_not_empty = ConditionalRule::new("notes", ConditionOperator::IsNotEmpty, "");

    assert!(ConditionService::evaluate_visibility(Some(&is_empty), &FormValues::new()));
    assert!(ConditionService::evaluate_visibility(
        Some(&is_empty),
        &values(&[("notes", json!("   "))])
    ));
    assert!(ConditionService::evaluate_visibility(
        Some(&is_not_empty),
        &values(&[("notes", json!("hi"))])
    ));
    assert!(!ConditionService::evaluate_visibility(
        Some(&is_not_empty),
        &values(&[("notes", serde_json::Value::Null)])
    ));
}

#[test]
fn missing_value_does_not_equal_anything() {
    let rule = ConditionalRule::new("pet", ConditionOperator::Equals, "dog");
    assert!(!ConditionService::evaluate_visibility(Some(&rule), &FormValues::new()));
}

#[test]
fn unknown_operator_fails_open() {
    let rule = ConditionalRule::new("pet", ConditionOperator::from("greater_than"), "3");
    assert!(ConditionService::evaluate_visibility(Some(&rule), &FormValues::new()));
}

#[test]
fn stale_target_fails_open() {
    let fields = vec![
        text("pet"),
        text("breed").with_conditional(ConditionalRule::new(
            "deleted",
            ConditionOperator::Equals,
            "dog",
        )),
    ];
    assert!(ConditionService::is_field_visible(
        &fields[1],
        &fields,
        &FormValues::new()
    ));
}

#[test]
fn visible_fields_filters_hidden_dependents() {
    let fields = vec![
        text("pet"),
        text("breed").with_conditional(ConditionalRule::new(
            "pet",
            ConditionOperator::Equals,
            "dog",
        )),
    ];
    let current = values(&[("pet", json!("cat"))]);
    let visible = ConditionService::visible_fields(&fields, &fields, &current);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "pet");
}
