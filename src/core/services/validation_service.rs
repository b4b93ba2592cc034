use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::{Field, FieldType, FormValues};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const NUMBER_MESSAGE: &str = "Please enter a valid number";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\-]{7,20}$").expect("phone pattern compiles"));

/// Per-field error messages keyed by field id.
pub type FieldErrors = BTreeMap<String, String>;

/// Checks a candidate value against a field's constraints.
///
/// Failures are returned as messages; nothing here panics or errors on bad input.
pub struct ValidationService;

impl ValidationService {
    pub fn validate(field: &Field, value: Option<&Value>) -> Option<String> {
        if field.field_type.is_required_exempt() {
            return None;
        }

        if field.required && Self::is_blank(field.field_type, value) {
            return Some(REQUIRED_MESSAGE.to_string());
        }

        let text = as_text(value);
        match field.field_type {
            // The email format applies to empty values too.
            FieldType::Email if !EMAIL_PATTERN.is_match(text.trim()) => {
                return Some(EMAIL_MESSAGE.to_string());
            }
            FieldType::Phone => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                if !compact.is_empty() && !PHONE_PATTERN.is_match(&compact) {
                    return Some(PHONE_MESSAGE.to_string());
                }
            }
            _ => {}
        }

        let numeric = if matches!(field.field_type, FieldType::Number | FieldType::Slider)
            && !text.trim().is_empty()
        {
            match text.trim().parse::<f64>() {
                Ok(number) => Some(number),
                Err(_) => return Some(NUMBER_MESSAGE.to_string()),
            }
        } else {
            None
        };

        let rules = field.validation.as_ref()?;

        if let Some(limit) = rules.max_length {
            if text.chars().count() > limit {
                return Some(format!("Maximum {} characters allowed", limit));
            }
        }

        if let Some(number) = numeric {
            if let Some(min) = rules.min {
                if number < min {
                    return Some(format!("Value must be at least {}", min));
                }
            }
            if let Some(max) = rules.max {
                if number > max {
                    return Some(format!("Value must be at most {}", max));
                }
            }
        }

        None
    }

    /// Validates every field in `fields`, collecting the failures.
    pub fn validate_all<'a>(
        fields: impl IntoIterator<Item = &'a Field>,
        values: &FormValues,
    ) -> FieldErrors {
        fields
            .into_iter()
            .filter_map(|field| {
                Self::validate(field, values.get(&field.id)).map(|message| (field.id.clone(), message))
            })
            .collect()
    }

    fn is_blank(field_type: FieldType, value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(text)) => text.trim().is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(Value::Object(map)) => map.is_empty(),
            Some(Value::Bool(flag)) => field_type == FieldType::Checkbox && !flag,
            Some(Value::Number(_)) => false,
        }
    }
}

fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValidation;
    use serde_json::json;

    #[test]
    fn required_checklist_needs_a_selection() {
        let field = Field::new("c", FieldType::Checklist).required();
        assert_eq!(
            ValidationService::validate(&field, Some(&json!([]))),
            Some(REQUIRED_MESSAGE.to_string())
        );
        assert_eq!(ValidationService::validate(&field, Some(&json!(["A"]))), None);
    }

    #[test]
    fn phone_ignores_internal_whitespace() {
        let field = Field::new("p", FieldType::Phone);
        assert_eq!(
            ValidationService::validate(&field, Some(&json!("+1 (555) 010 2030"))),
            None
        );
        assert!(ValidationService::validate(&field, Some(&json!("555-CALL-NOW"))).is_some());
        assert!(ValidationService::validate(&field, Some(&json!("12345"))).is_some());
    }

    #[test]
    fn phone_length_bounds_apply_after_stripping_spaces() {
        let field = Field::new("p", FieldType::Phone);
        let check = |raw: &str| ValidationService::validate(&field, Some(&json!(raw)));
        assert_eq!(check("1234567"), None);
        assert_eq!(check("12345678901234567890"), None);
        assert_eq!(check("1234 5678 9012 3456 7890"), None);
        assert_eq!(check("123456"), Some(PHONE_MESSAGE.to_string()));
        assert_eq!(check("123456789012345678901"), Some(PHONE_MESSAGE.to_string()));
        assert_eq!(check("123 456"), Some(PHONE_MESSAGE.to_string()));
    }

    #[test]
    fn blank_optional_phone_passes() {
        let field = Field::new("p", FieldType::Phone);
        assert_eq!(ValidationService::validate(&field, None), None);
        assert_eq!(ValidationService::validate(&field, Some(&json!("  "))), None);

        let required = Field::new("p", FieldType::Phone).required();
        assert_eq!(
            ValidationService::validate(&required, None),
            Some(REQUIRED_MESSAGE.to_string())
        );
    }

    #[test]
    fn slider_range_is_enforced() {
        let field = Field::new("s", FieldType::Slider).with_validation(FieldValidation::range(1.0, 5.0));
        assert_eq!(ValidationService::validate(&field, Some(&json!(3))), None);
        assert_eq!(
            ValidationService::validate(&field, Some(&json!(9))),
            Some("Value must be at most 5".to_string())
        );
    }
}
