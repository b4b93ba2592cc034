//! Builder session: the schema being edited plus transient editor state.

use tracing::{debug, info};

use crate::{
    config::Config,
    core::services::{
        DragPayload, DropIntent, DropSlot, GroupedLayout, LayoutService, ReorderService,
        SchemaService,
    },
    domain::{Field, FieldPatch, FieldType, FormSchema, Step},
    errors::FormError,
};

/// Host callback invoked when the user explicitly saves or publishes a form.
pub trait SchemaSink: Send + Sync {
    fn save(&self, schema: &FormSchema) -> Result<(), FormError>;
}

/// Hover and drag-source state. Pure UI feedback, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub source: Option<DragPayload>,
    pub hover: Option<DropSlot>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }
}

/// Result of dispatching a drop.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Created(Field),
    Moved { field_id: String, changed: bool },
}

pub struct FormBuilder {
    schema: FormSchema,
    selected: Option<String>,
    drag: DragState,
    sink: Box<dyn SchemaSink>,
}

impl FormBuilder {
    pub fn new(schema: FormSchema, sink: Box<dyn SchemaSink>) -> Self {
        Self {
            schema,
            selected: None,
            drag: DragState::default(),
            sink,
        }
    }

    /// Starts a blank form using the configured presentation defaults.
    pub fn from_config(title: impl Into<String>, config: &Config, sink: Box<dyn SchemaSink>) -> Self {
        let mut schema = FormSchema::new(title);
        schema.layout = config.default_layout;
        schema.form_width = config.default_form_width;
        schema.show_title = config.show_title;
        Self::new(schema, sink)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Form-level attributes (title, images, layout) are edited directly.
    pub fn schema_mut(&mut self) -> &mut FormSchema {
        &mut self.schema
    }

    pub fn into_schema(self) -> FormSchema {
        self.schema
    }

    pub fn selected(&self) -> Option<&Field> {
        self.selected
            .as_deref()
            .and_then(|id| self.schema.field(id))
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.schema.field(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn create_field(&mut self, field_type: FieldType, at_index: usize) -> Field {
        let field = SchemaService::create_field(&mut self.schema, field_type, at_index);
        self.selected = Some(field.id.clone());
        field
    }

    pub fn insert_field(&mut self, field: Field, at_index: usize) -> bool {
        let id = field.id.clone();
        let inserted = SchemaService::insert_field(&mut self.schema, field, at_index);
        if inserted {
            self.selected = Some(id);
        }
        inserted
    }

    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> bool {
        SchemaService::update_field(&mut self.schema, id, patch)
    }

    pub fn remove_field(&mut self, id: &str) -> bool {
        let removed = SchemaService::remove_field(&mut self.schema, id);
        if removed && self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        removed
    }

    pub fn move_field(&mut self, id: &str, target_index: usize) -> bool {
        SchemaService::move_field(&mut self.schema, id, target_index)
    }

    pub fn layout(&self) -> GroupedLayout<'_> {
        LayoutService::group(&self.schema.fields)
    }

    /// Rebuilds the wizard steps. Steps are not refreshed automatically after
    /// later edits.
    pub fn derive_steps(&mut self) -> &[Step] {
        SchemaService::derive_steps(&mut self.schema);
        &self.schema.steps
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn drag_start(&mut self, payload: DragPayload) {
        self.drag.source = Some(payload);
        self.drag.hover = None;
    }

    pub fn drag_over(&mut self, slot: DropSlot) {
        self.drag.hover = Some(slot);
    }

    /// Clears hover and source whether or not a drop happened.
    pub fn drag_end(&mut self) {
        self.drag = DragState::default();
    }

    /// Dispatches the current drag source onto `slot`.
    pub fn drop_on(&mut self, slot: DropSlot) -> Option<DropOutcome> {
        let payload = self.drag.source.clone()?;
        self.apply_drop(&payload, &slot)
    }

    pub fn apply_drop(&mut self, payload: &DragPayload, slot: &DropSlot) -> Option<DropOutcome> {
        let index = ReorderService::resolve_slot(&self.schema.fields, slot);
        match payload.intent()? {
            DropIntent::InsertNew(field_type) => {
                debug!(%field_type, index, "drop inserts new field");
                Some(DropOutcome::Created(self.create_field(field_type, index)))
            }
            DropIntent::MoveExisting(field_id) => {
                debug!(field_id = %field_id, index, "drop moves existing field");
                let changed = self.move_field(&field_id, index);
                Some(DropOutcome::Moved { field_id, changed })
            }
        }
    }

    /// Hands the schema to the host. The only path to persistence.
    pub fn save(&self) -> Result<(), FormError> {
        self.sink.save(&self.schema)?;
        info!(form_id = %self.schema.id, fields = self.schema.fields.len(), "form saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FormLayout;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemorySink {
        saved: Arc<Mutex<Vec<FormSchema>>>,
    }

    impl SchemaSink for MemorySink {
        fn save(&self, schema: &FormSchema) -> Result<(), FormError> {
            self.saved.lock().unwrap().push(schema.clone());
            Ok(())
        }
    }

    fn builder() -> (FormBuilder, MemorySink) {
        let sink = MemorySink::default();
        let schema = FormSchema::new("Survey").with_fields(vec![
            Field::new("s1", FieldType::Section).with_label("One"),
            Field::new("a", FieldType::Text),
            Field::new("s2", FieldType::Section).with_label("Two"),
            Field::new("b", FieldType::Text),
        ]);
        (FormBuilder::new(schema, Box::new(sink.clone())), sink)
    }

    fn ids(builder: &FormBuilder) -> Vec<&str> {
        builder.schema().fields.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn created_field_becomes_selected_and_removal_clears_it() {
        let (mut builder, _) = builder();
        let field = builder.create_field(FieldType::Email, 2);
        assert_eq!(builder.selected().map(|f| f.id.as_str()), Some(field.id.as_str()));
        assert_eq!(builder.schema().fields[2].id, field.id);

        assert!(builder.remove_field(&field.id));
        assert!(builder.selected().is_none());
        assert!(!builder.remove_field(&field.id));
    }

    #[test]
    fn palette_drop_inserts_beside_anchor() {
        let (mut builder, _) = builder();
        builder.drag_start(DragPayload::palette(FieldType::Number));
        builder.drag_over(DropSlot::InlineBeside("a".into()));
        assert!(builder.drag_state().is_dragging());

        let outcome = builder.drop_on(DropSlot::InlineBeside("a".into()));
        let Some(DropOutcome::Created(field)) = outcome else {
            panic!("expected a new field");
        };
        assert_eq!(builder.schema().position(&field.id), Some(2));

        builder.drag_end();
        assert_eq!(builder.drag_state(), &DragState::default());
    }

    #[test]
    fn dragging_a_section_moves_its_block() {
        let (mut builder, _) = builder();
        builder.drag_start(DragPayload::existing("s2"));
        let outcome = builder.drop_on(DropSlot::Index(0));
        assert_eq!(
            outcome,
            Some(DropOutcome::Moved {
                field_id: "s2".into(),
                changed: true
            })
        );
        assert_eq!(ids(&builder), vec!["s2", "b", "s1", "a"]);
    }

    #[test]
    fn drop_without_drag_does_nothing() {
        let (mut builder, _) = builder();
        assert!(builder.drop_on(DropSlot::Index(0)).is_none());
        builder.drag_end();
        assert!(!builder.drag_state().is_dragging());
    }

    #[test]
    fn steps_only_change_when_derived() {
        let (mut builder, _) = builder();
        assert_eq!(builder.derive_steps().len(), 2);
        builder.create_field(FieldType::Section, 4);
        assert_eq!(builder.schema().steps.len(), 2);
        assert_eq!(builder.derive_steps().len(), 3);
    }

    #[test]
    fn save_hands_schema_to_sink() {
        let (builder, sink) = builder();
        builder.save().unwrap();
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Survey");
    }

    #[test]
    fn config_defaults_apply_to_new_forms() {
        let config = Config {
            default_layout: FormLayout::Stepped,
            show_title: false,
            ..Config::default()
        };
        let builder = FormBuilder::from_config("Intake", &config, Box::new(MemorySink::default()));
        assert_eq!(builder.schema().layout, FormLayout::Stepped);
        assert!(!builder.schema().show_title);
        assert!(builder.schema().fields.is_empty());
    }
}
