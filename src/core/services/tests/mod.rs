mod condition_service_tests;
mod reorder_service_tests;
mod schema_service_tests;

use crate::domain::{Field, FieldType};

pub(super) fn text(id: &str) -> Field {
    Field::new(id, FieldType::Text).with_label(id)
}

pub(super) fn section(id: &str) -> Field {
    Field::new(id, FieldType::Section).with_label(id)
}

pub(super) fn ids(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(|field| field.id.as_str()).collect()
}
