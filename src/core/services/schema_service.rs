use tracing::debug;

use crate::domain::{Field, FieldPatch, FieldType, FormSchema};

use super::{reorder_service::ReorderService, step_service::StepService};

/// Mutation commands over a [`FormSchema`].
///
/// These are the only sanctioned way to change a schema's field list; an
/// automated assistant proposing edits goes through the same calls. Unknown ids
/// are ignored and reported back as `false`.
pub struct SchemaService;

impl SchemaService {
    pub fn create_field(schema: &mut FormSchema, field_type: FieldType, at_index: usize) -> Field {
        let (fields, field) = ReorderService::add_field(&schema.fields, field_type, at_index);
        schema.fields = fields;
        schema.touch();
        debug!(field_id = %field.id, %field_type, "created field");
        field
    }

    /// Inserts a caller-built field. Rejected when the id is already taken.
    pub fn insert_field(schema: &mut FormSchema, field: Field, at_index: usize) -> bool {
        if schema.field(&field.id).is_some() {
            debug!(field_id = %field.id, "insert ignored: duplicate id");
            return false;
        }
        schema.fields = ReorderService::insert_field(&schema.fields, field, at_index);
        schema.touch();
        true
    }

    pub fn update_field(schema: &mut FormSchema, id: &str, patch: FieldPatch) -> bool {
        let Some(field) = schema.field_mut(id) else {
            debug!(field_id = id, "update ignored: unknown field");
            return false;
        };
        patch.apply_to(field);
        schema.touch();
        true
    }

    /// Removes exactly one field. Removing a section leaves its former children
    /// in place, where they join whichever block now precedes them.
    pub fn remove_field(schema: &mut FormSchema, id: &str) -> bool {
        let before = schema.fields.len();
        schema.fields.retain(|field| field.id != id);
        if schema.fields.len() == before {
            debug!(field_id = id, "remove ignored: unknown field");
            return false;
        }
        schema.touch();
        true
    }

    pub fn move_field(schema: &mut FormSchema, id: &str, target_index: usize) -> bool {
        let next = ReorderService::move_field_to_index(&schema.fields, id, target_index);
        if next == schema.fields {
            return false;
        }
        schema.fields = next;
        schema.touch();
        true
    }

    /// Rebuilds `schema.steps` from scratch.
    pub fn derive_steps(schema: &mut FormSchema) {
        schema.steps = StepService::derive_steps(&schema.fields);
        schema.touch();
    }
}
