use chrono::{DateTime, Utc};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::Config,
    core::{SchemaSink, SubmissionSink},
    domain::{FormSchema, Submission},
    errors::FormError,
    utils::persistence::{read_json, write_json_atomic},
};

use super::Result;

const FORMS_DIR: &str = "forms";
const SUBMISSIONS_DIR: &str = "submissions";
const EXTENSION: &str = "json";
const SUBMISSION_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%3f";

/// Listing entry for a stored form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSummary {
    pub slug: String,
    pub id: Uuid,
    pub title: String,
    pub field_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// Stores forms as `forms/<slug>.json` and each submission as its own file
/// under `submissions/<form-id>/`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    forms_dir: PathBuf,
    submissions_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        let forms_dir = root.join(FORMS_DIR);
        let submissions_dir = root.join(SUBMISSIONS_DIR);
        fs::create_dir_all(&forms_dir)?;
        fs::create_dir_all(&submissions_dir)?;
        Ok(Self {
            root,
            forms_dir,
            submissions_dir,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.resolve_storage_root())
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn form_path(&self, name: &str) -> PathBuf {
        self.forms_dir
            .join(format!("{}.{}", canonical_name(name), EXTENSION))
    }

    fn submission_dir(&self, form_id: Uuid) -> PathBuf {
        self.submissions_dir.join(form_id.to_string())
    }

    /// Loads a form by title or slug.
    pub fn load_schema(&self, name: &str) -> Result<FormSchema> {
        read_json(&self.form_path(name))
    }

    pub fn list_forms(&self) -> Result<Vec<FormSummary>> {
        let mut forms = Vec::new();
        for path in json_files(&self.forms_dir)? {
            let schema: FormSchema = match read_json(&path) {
                Ok(schema) => schema,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable form");
                    continue;
                }
            };
            let slug = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            forms.push(FormSummary {
                slug,
                id: schema.id,
                title: schema.title,
                field_count: schema.fields.len(),
                updated_at: schema.updated_at,
            });
        }
        forms.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(forms)
    }

    /// Submissions for one form, oldest first.
    pub fn list_submissions(&self, form_id: Uuid) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        for path in json_files(&self.submission_dir(form_id))? {
            match read_json::<Submission>(&path) {
                Ok(submission) => submissions.push(submission),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable submission")
                }
            }
        }
        submissions.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(submissions)
    }
}

impl SchemaSink for JsonStorage {
    fn save(&self, schema: &FormSchema) -> std::result::Result<(), FormError> {
        let path = self.form_path(&schema.title);
        write_json_atomic(schema, &path)?;
        debug!(path = %path.display(), "wrote form");
        Ok(())
    }
}

impl SubmissionSink for JsonStorage {
    fn submit(&self, submission: &Submission) -> std::result::Result<(), FormError> {
        let file_name = format!(
            "{}_{}.{}",
            submission.submitted_at.format(SUBMISSION_TIMESTAMP_FORMAT),
            submission.id.simple(),
            EXTENSION
        );
        let path = self.submission_dir(submission.form_id).join(file_name);
        write_json_atomic(submission, &path)?;
        debug!(path = %path.display(), "wrote submission");
        Ok(())
    }
}

/// Lower-cased, underscore-separated file stem for a form title.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "form".into()
    } else {
        sanitized
    }
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(EXTENSION) {
            paths.push(path);
        }
    }
    Ok(paths)
}
