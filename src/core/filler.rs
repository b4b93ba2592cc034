//! Fill-time session: collects answers, walks steps, validates and submits.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    core::services::{ConditionService, FieldErrors, StepService, SubmissionService, ValidationService},
    domain::{Field, FormLayout, FormSchema, FormValues, Step, Submission},
    errors::FormError,
};

/// Host callback receiving a successfully validated submission.
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: &Submission) -> Result<(), FormError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Editing the step at this index.
    Editing(usize),
    /// Terminal. Further input is ignored.
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted(Submission),
    /// Validation failed; nothing was handed to the sink.
    Rejected(FieldErrors),
    /// Not on the final step, or already submitted.
    NotReady,
}

pub struct FillSession {
    schema: FormSchema,
    steps: Vec<Step>,
    values: FormValues,
    errors: FieldErrors,
    touched: BTreeSet<String>,
    state: FillState,
    submitted_by: String,
    sink: Box<dyn SubmissionSink>,
}

impl FillSession {
    pub fn new(schema: FormSchema, sink: Box<dyn SubmissionSink>) -> Self {
        let steps = plan_steps(&schema);
        debug!(form_id = %schema.id, steps = steps.len(), "fill session opened");
        Self {
            schema,
            steps,
            values: FormValues::new(),
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            state: FillState::Editing(0),
            submitted_by: "anonymous".into(),
            sink,
        }
    }

    pub fn with_submitted_by(mut self, who: impl Into<String>) -> Self {
        self.submitted_by = who.into();
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> FillState {
        self.state
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> Option<&Step> {
        match self.state {
            FillState::Editing(index) => self.steps.get(index),
            FillState::Submitted => None,
        }
    }

    pub fn is_last_step(&self) -> bool {
        matches!(self.state, FillState::Editing(index) if index + 1 >= self.steps.len())
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn is_touched(&self, id: &str) -> bool {
        self.touched.contains(id)
    }

    /// Records an answer. A stale error on the field is dropped until the next
    /// blur or submit re-checks it.
    pub fn set_value(&mut self, id: &str, value: Value) -> bool {
        if self.state == FillState::Submitted || self.schema.field(id).is_none() {
            return false;
        }
        self.values.insert(id.to_string(), value);
        self.errors.remove(id);
        true
    }

    /// Marks the field touched and validates it on its own.
    pub fn blur(&mut self, id: &str) -> Option<&str> {
        if self.state == FillState::Submitted {
            return None;
        }
        let field = self.schema.field(id)?;
        self.touched.insert(id.to_string());
        match ValidationService::validate(field, self.values.get(id)) {
            Some(message) => {
                self.errors.insert(id.to_string(), message);
            }
            None => {
                self.errors.remove(id);
            }
        }
        self.error(id)
    }

    /// Visible fields of the current step, in step order.
    pub fn current_fields(&self) -> Vec<&Field> {
        match self.current_step() {
            Some(step) => self.visible_in(&step.field_ids),
            None => Vec::new(),
        }
    }

    /// Visible fields across every step.
    pub fn fields_in_play(&self) -> Vec<&Field> {
        let mut seen = BTreeSet::new();
        let ids: Vec<String> = self
            .steps
            .iter()
            .flat_map(|step| step.field_ids.iter())
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();
        self.visible_in(&ids)
    }

    /// Advances one step without validating. Returns false on the last step.
    pub fn next(&mut self) -> bool {
        match self.state {
            FillState::Editing(index) if index + 1 < self.steps.len() => {
                self.state = FillState::Editing(index + 1);
                true
            }
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.state {
            FillState::Editing(index) if index > 0 => {
                self.state = FillState::Editing(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Validates every visible field and, when clean, hands the assembled
    /// submission to the sink. A sink failure leaves the session editable.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if !self.is_last_step() {
            return Ok(SubmitOutcome::NotReady);
        }

        let errors = ValidationService::validate_all(self.fields_in_play(), &self.values);
        if !errors.is_empty() {
            warn!(form_id = %self.schema.id, errors = errors.len(), "submission rejected");
            self.touched.extend(errors.keys().cloned());
            self.errors = errors.clone();
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let submission = SubmissionService::build(&self.schema, &self.values, &self.submitted_by);
        self.sink.submit(&submission)?;
        self.errors.clear();
        self.state = FillState::Submitted;
        info!(
            form_id = %self.schema.id,
            submission_id = %submission.id,
            "submission accepted"
        );
        Ok(SubmitOutcome::Submitted(submission))
    }

    fn visible_in(&self, ids: &[String]) -> Vec<&Field> {
        let fields = &self.schema.fields;
        let resolved = ids.iter().filter_map(|id| self.schema.field(id));
        ConditionService::visible_fields(resolved, fields, &self.values)
    }
}

/// Stepped forms use their stored steps, or derive them when none were saved.
/// Classic forms fill as one implicit step holding every field.
fn plan_steps(schema: &FormSchema) -> Vec<Step> {
    match schema.layout {
        FormLayout::Stepped if !schema.steps.is_empty() => schema.steps.clone(),
        FormLayout::Stepped => StepService::derive_steps(&schema.fields),
        FormLayout::Classic => {
            let mut step = Step::new("step_1", schema.title.clone());
            step.field_ids = schema.fields.iter().map(|field| field.id.clone()).collect();
            vec![step]
        }
    }
}
