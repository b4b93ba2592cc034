//! Drag/reorder commands over an ordered field list.
//!
//! A section and every non-section field after it (up to the next section) form
//! a block. Moving a section moves its whole block in one splice, so the block
//! stays contiguous and keeps its internal order.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::domain::{Field, FieldType};

/// What a drop target was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropIntent {
    InsertNew(FieldType),
    MoveExisting(String),
}

/// Data carried by a drag gesture. Palette items carry a type, existing
/// fields carry their id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload {
    pub field_id: Option<String>,
    pub field_type: Option<FieldType>,
}

impl DragPayload {
    pub fn existing(id: impl Into<String>) -> Self {
        Self {
            field_id: Some(id.into()),
            field_type: None,
        }
    }

    pub fn palette(field_type: FieldType) -> Self {
        Self {
            field_id: None,
            field_type: Some(field_type),
        }
    }

    /// The id-bearing intent wins when both are present.
    pub fn intent(&self) -> Option<DropIntent> {
        match (&self.field_id, self.field_type) {
            (Some(id), _) if !id.is_empty() => Some(DropIntent::MoveExisting(id.clone())),
            (_, Some(field_type)) => Some(DropIntent::InsertNew(field_type)),
            _ => None,
        }
    }
}

/// Where a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropSlot {
    /// Gap before the field currently at this index (or end of list).
    Index(usize),
    /// Empty second column beside a lone half-width field.
    InlineBeside(String),
}

pub struct ReorderService;

impl ReorderService {
    /// Creates a field of `field_type` and splices it in at `at_index`, clamped
    /// to `[0, len]`.
    pub fn add_field(fields: &[Field], field_type: FieldType, at_index: usize) -> (Vec<Field>, Field) {
        let field = Field::with_generated_id(field_type);
        let next = Self::insert_field(fields, field.clone(), at_index);
        (next, field)
    }

    /// Splices an already-built field in at `at_index`, clamped to `[0, len]`.
    pub fn insert_field(fields: &[Field], field: Field, at_index: usize) -> Vec<Field> {
        let index = at_index.min(fields.len());
        let mut next = fields.to_vec();
        next.insert(index, field);
        next
    }

    /// Index range covered by the block that `index` heads. Non-section
    /// fields are a block of one.
    pub fn block_range(fields: &[Field], index: usize) -> RangeInclusive<usize> {
        let is_section = fields.get(index).map(Field::is_section).unwrap_or(false);
        if !is_section {
            return index..=index;
        }
        let mut end = index;
        while end + 1 < fields.len() && !fields[end + 1].is_section() {
            end += 1;
        }
        index..=end
    }

    pub fn move_field_to_index(fields: &[Field], field_id: &str, target_index: usize) -> Vec<Field> {
        let Some(from) = fields.iter().position(|field| field.id == field_id) else {
            debug!(field_id, "move ignored: unknown field");
            return fields.to_vec();
        };

        let range = Self::block_range(fields, from);
        let from_end = *range.end();
        if target_index >= from && target_index <= from_end + 1 {
            debug!(field_id, target_index, "move ignored: target inside own block");
            return fields.to_vec();
        }

        let mut next = fields.to_vec();
        let block: Vec<Field> = next.drain(range).collect();
        let block_len = block.len();

        let insert_at = if target_index > from_end {
            target_index.saturating_sub(block_len).min(next.len())
        } else {
            target_index.min(next.len())
        };

        debug!(field_id, from, block_len, insert_at, "moving block");
        next.splice(insert_at..insert_at, block);
        next
    }

    /// Resolves a drop slot into a concrete insertion index.
    pub fn resolve_slot(fields: &[Field], slot: &DropSlot) -> usize {
        match slot {
            DropSlot::Index(index) => (*index).min(fields.len()),
            DropSlot::InlineBeside(anchor) => fields
                .iter()
                .position(|field| &field.id == anchor)
                .map(|position| position + 1)
                .unwrap_or(fields.len()),
        }
    }
}
