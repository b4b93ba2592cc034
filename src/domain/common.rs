use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Current value for each field id while a form is being filled.
pub type FormValues = BTreeMap<String, Value>;

/// Cleaned submission payload keyed by field id.
pub type SubmissionPayload = Map<String, Value>;

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use serde_json;
pub use uuid;
