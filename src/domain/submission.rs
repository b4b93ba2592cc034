//! Domain types representing completed form submissions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Review state of a submission once it reaches the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Reviewed,
    Archived,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Reviewed => "reviewed",
            SubmissionStatus::Archived => "archived",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub data: SubmissionPayload,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub status: SubmissionStatus,
}

impl Submission {
    pub fn new(form_id: Uuid, data: SubmissionPayload, submitted_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id,
            data,
            submitted_by: submitted_by.into(),
            submitted_at: Utc::now(),
            status: SubmissionStatus::Pending,
        }
    }
}

impl Displayable for Submission {
    fn display_label(&self) -> String {
        format!(
            "{} by {} at {} ({})",
            self.id,
            self.submitted_by,
            self.submitted_at.format("%Y-%m-%d %H:%M"),
            self.status
        )
    }
}
