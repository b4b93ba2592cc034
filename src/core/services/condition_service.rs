use serde_json::Value;

use crate::domain::{ConditionOperator, ConditionalRule, Field, FormValues};

/// Evaluates field visibility rules at fill time.
///
/// Runs once per conditional field on every value change, so it stays
/// allocation-light and never fails: anything it cannot interpret is visible.
pub struct ConditionService;

impl ConditionService {
    pub fn evaluate_visibility(rule: Option<&ConditionalRule>, values: &FormValues) -> bool {
        let Some(rule) = rule else {
            return true;
        };
        if rule.field_id.is_empty() {
            return true;
        }

        let actual = normalize(values.get(&rule.field_id));
        let expected = rule.value.trim().to_lowercase();

        match &rule.operator {
            ConditionOperator::Equals => actual == expected,
            ConditionOperator::NotEquals => actual != expected,
            ConditionOperator::Contains => actual.contains(&expected),
            ConditionOperator::IsEmpty => actual.is_empty(),
            ConditionOperator::IsNotEmpty => !actual.is_empty(),
            ConditionOperator::Unknown(_) => true,
        }
    }

    /// Like [`Self::evaluate_visibility`], but a rule whose target is not part
    /// of `fields` is treated as absent.
    pub fn is_field_visible(field: &Field, fields: &[Field], values: &FormValues) -> bool {
        match &field.conditional {
            Some(rule) if fields.iter().any(|candidate| candidate.id == rule.field_id) => {
                Self::evaluate_visibility(Some(rule), values)
            }
            _ => true,
        }
    }

    pub fn visible_fields<'a>(
        subset: impl IntoIterator<Item = &'a Field>,
        fields: &[Field],
        values: &FormValues,
    ) -> Vec<&'a Field> {
        subset
            .into_iter()
            .filter(|field| Self::is_field_visible(field, fields, values))
            .collect()
    }
}

/// String form used for comparisons: trimmed and lower-cased. Lists join their
/// items with commas; null and missing values are empty.
fn normalize(value: Option<&Value>) -> String {
    let raw = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
    };
    raw.trim().to_lowercase()
}
