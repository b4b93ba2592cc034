use tracing::debug;

use crate::domain::{Field, Step};

const FALLBACK_TITLE_PREFIX: &str = "Step";

/// Partitions a field list into wizard steps at section boundaries.
///
/// Every call is a full rebuild; previously derived steps are discarded.
pub struct StepService;

impl StepService {
    pub fn derive_steps(fields: &[Field]) -> Vec<Step> {
        if !fields.iter().any(Field::starts_step) {
            let title = fields
                .first()
                .filter(|first| first.is_section() && !first.label.trim().is_empty())
                .map(|first| first.label.clone())
                .unwrap_or_else(|| fallback_title(1));
            let mut step = Step::new(step_id(1), title);
            step.field_ids = fields.iter().map(|field| field.id.clone()).collect();
            return vec![step];
        }

        let mut steps: Vec<Step> = Vec::new();
        for field in fields {
            if field.starts_step() {
                let number = steps.len() + 1;
                let title = if field.label.trim().is_empty() {
                    fallback_title(number)
                } else {
                    field.label.clone()
                };
                steps.push(Step::new(step_id(number), title));
            } else if steps.is_empty() {
                // Fields ahead of the first step section get a leading step of
                // their own rather than disappearing from the wizard.
                steps.push(Step::new(step_id(1), fallback_title(1)));
            }
            if let Some(current) = steps.last_mut() {
                current.field_ids.push(field.id.clone());
            }
        }

        debug!(steps = steps.len(), fields = fields.len(), "derived steps");
        steps
    }
}

fn step_id(number: usize) -> String {
    format!("step_{}", number)
}

fn fallback_title(number: usize) -> String {
    format!("{} {}", FALLBACK_TITLE_PREFIX, number)
}
