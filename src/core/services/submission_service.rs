use serde_json::Value;
use tracing::debug;

use crate::domain::{Field, FieldType, FormSchema, FormValues, Submission, SubmissionPayload};

/// Builds the cleaned payload handed to the host on submit.
pub struct SubmissionService;

impl SubmissionService {
    /// Walks the entire field list, visible or not, and never fails.
    ///
    /// Checkboxes always produce a boolean and checklists always produce a list.
    /// Hidden fields are copied as-is when set. Everything else is kept only
    /// when it holds a non-null, non-empty value.
    pub fn assemble(fields: &[Field], values: &FormValues) -> SubmissionPayload {
        let mut payload = SubmissionPayload::new();
        for field in fields {
            let value = values.get(&field.id);
            match field.field_type {
                FieldType::Checkbox => {
                    payload.insert(field.id.clone(), Value::Bool(truthy(value)));
                }
                FieldType::Checklist => {
                    let items = match value {
                        Some(Value::Array(items)) => Value::Array(items.clone()),
                        _ => Value::Array(Vec::new()),
                    };
                    payload.insert(field.id.clone(), items);
                }
                FieldType::Hidden => {
                    if let Some(present) = value {
                        payload.insert(field.id.clone(), present.clone());
                    }
                }
                _ => match value {
                    None | Some(Value::Null) => {}
                    Some(Value::String(text)) if text.is_empty() => {}
                    Some(present) => {
                        payload.insert(field.id.clone(), present.clone());
                    }
                },
            }
        }
        debug!(keys = payload.len(), "assembled submission payload");
        payload
    }

    pub fn build(schema: &FormSchema, values: &FormValues, submitted_by: &str) -> Submission {
        Submission::new(schema.id, Self::assemble(&schema.fields, values), submitted_by)
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty() && text != "false",
        Some(Value::Number(number)) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
