pub mod builder;
pub mod filler;
pub mod services;

pub use builder::{DragState, DropOutcome, FormBuilder, SchemaSink};
pub use filler::{FillSession, FillState, SubmissionSink, SubmitOutcome};
