//! File-backed host for schemas and submissions.

pub mod json_backend;

use crate::errors::FormError;

pub type Result<T> = std::result::Result<T, FormError>;

pub use json_backend::{canonical_name, FormSummary, JsonStorage};
