#![allow(dead_code)]

use form_core::{
    domain::{Field, FieldType, FormSchema},
    storage::JsonStorage,
};
use tempfile::TempDir;

/// Storage rooted in a fresh temp dir. Keep the guard alive for the test.
pub fn temp_storage() -> (JsonStorage, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let storage = JsonStorage::new(temp.path().to_path_buf()).expect("create json storage");
    (storage, temp)
}

/// Name (required), email, topics (required checklist of A/B).
pub fn contact_schema() -> FormSchema {
    FormSchema::new("Contact").with_fields(vec![
        Field::new("name", FieldType::Text).with_label("Name").required(),
        Field::new("email", FieldType::Email).with_label("Email"),
        Field::new("topics", FieldType::Checklist)
            .with_label("Topics")
            .with_options(["A", "B"])
            .required(),
    ])
}
