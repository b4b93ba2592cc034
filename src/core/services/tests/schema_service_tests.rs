use super::{ids, section, text};
use crate::core::services::{LayoutService, SchemaService};
use crate::domain::{FieldPatch, FieldType, FormSchema};

fn sample_schema() -> FormSchema {
    FormSchema::new("Intake").with_fields(vec![
        section("s1"),
        text("a"),
        section("s2"),
        text("b"),
        text("c"),
    ])
}

#[test]
fn create_field_inserts_at_index() {
    let mut schema = sample_schema();
    let created = SchemaService::create_field(&mut schema, FieldType::Email, 1);
    assert_eq!(schema.fields[1].id, created.id);
    assert_eq!(schema.field_count(), 6);
}

#[test]
fn update_field_applies_patch() {
    let mut schema = sample_schema();
    assert!(SchemaService::update_field(
        &mut schema,
        "a",
        FieldPatch {
            label: Some("Full name".into()),
            required: Some(true),
            ..FieldPatch::default()
        }
    ));
    let field = schema.field("a").unwrap();
    assert_eq!(field.label, "Full name");
    assert!(field.required);
}

#[test]
fn unknown_ids_are_no_ops() {
    let mut schema = sample_schema();
    let before = schema.fields.clone();
    assert!(!SchemaService::update_field(&mut schema, "zzz", FieldPatch::label("x")));
    assert!(!SchemaService::remove_field(&mut schema, "zzz"));
    assert!(!SchemaService::move_field(&mut schema, "zzz", 0));
    assert_eq!(schema.fields, before);
}

#[test]
fn removing_a_section_orphans_its_children() {
    let mut schema = sample_schema();
    assert!(SchemaService::remove_field(&mut schema, "s2"));
    assert_eq!(ids(&schema.fields), vec!["s1", "a", "b", "c"]);

    let layout = LayoutService::group(&schema.fields);
    assert_eq!(layout.sections.len(), 1);
    let children: Vec<&str> = layout.sections[0]
        .children
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(children, vec!["a", "b", "c"]);
}

#[test]
fn steps_go_stale_until_rederived() {
    let mut schema = sample_schema();
    SchemaService::derive_steps(&mut schema);
    assert_eq!(schema.steps.len(), 2);

    SchemaService::remove_field(&mut schema, "b");
    assert!(schema.steps[1].field_ids.contains(&"b".to_string()));

    SchemaService::derive_steps(&mut schema);
    assert_eq!(schema.steps[1].field_ids, vec!["s2", "c"]);
}

#[test]
fn move_field_reports_changes() {
    let mut schema = sample_schema();
    assert!(SchemaService::move_field(&mut schema, "s2", 0));
    assert_eq!(ids(&schema.fields), vec!["s2", "b", "c", "s1", "a"]);
    assert!(!SchemaService::move_field(&mut schema, "s2", 1));
}

#[test]
fn insert_field_rejects_duplicate_ids() {
    let mut schema = sample_schema();
    assert!(SchemaService::insert_field(&mut schema, text("d"), 2));
    assert_eq!(ids(&schema.fields), vec!["s1", "a", "d", "s2", "b", "c"]);
    assert!(!SchemaService::insert_field(&mut schema, text("a"), 0));
    assert_eq!(schema.field_count(), 6);
}
