//! Plain data shapes for forms, fields, steps, and submissions. No I/O.

pub mod common;
pub mod field;
pub mod schema;
pub mod submission;

pub use common::{
    Displayable, FormValues, NamedEntity, SubmissionPayload,
};
pub use field::{
    ConditionOperator, ConditionalRule, Field, FieldPatch, FieldType, FieldValidation,
};
pub use schema::{FormLayout, FormSchema, FormWidth, Step};
pub use submission::{Submission, SubmissionStatus};
