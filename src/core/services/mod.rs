pub mod condition_service;
pub mod layout_service;
pub mod reorder_service;
pub mod schema_service;
pub mod step_service;
pub mod submission_service;
pub mod validation_service;

pub use condition_service::ConditionService;
pub use layout_service::{GroupedLayout, LayoutRow, LayoutService, SectionGroup};
pub use reorder_service::{DragPayload, DropIntent, DropSlot, ReorderService};
pub use schema_service::SchemaService;
pub use step_service::StepService;
pub use submission_service::SubmissionService;
pub use validation_service::{FieldErrors, ValidationService};

#[cfg(test)]
mod tests;
