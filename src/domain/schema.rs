use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::*, field::Field};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// How the filler presents the form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormLayout {
    /// Every field on one page.
    #[default]
    Classic,
    /// One page per derived step.
    Stepped,
}

impl fmt::Display for FormLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormLayout::Classic => "classic",
            FormLayout::Stepped => "stepped",
        };
        f.write_str(label)
    }
}

impl FromStr for FormLayout {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(FormLayout::Classic),
            "stepped" => Ok(FormLayout::Stepped),
            other => Err(format!("unknown layout `{}` (expected classic or stepped)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormWidth {
    Narrow,
    #[default]
    Medium,
    Wide,
    Full,
}

impl fmt::Display for FormWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormWidth::Narrow => "narrow",
            FormWidth::Medium => "medium",
            FormWidth::Wide => "wide",
            FormWidth::Full => "full",
        };
        f.write_str(label)
    }
}

impl FromStr for FormWidth {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "narrow" => Ok(FormWidth::Narrow),
            "medium" => Ok(FormWidth::Medium),
            "wide" => Ok(FormWidth::Wide),
            "full" => Ok(FormWidth::Full),
            other => Err(format!("unknown width `{}`", other)),
        }
    }
}

/// A named, ordered subset of field ids shown together in a multi-page flow.
///
/// Steps are a cached derivation. They are not updated when fields are added,
/// removed or reordered afterwards; call `derive_steps` again to rebuild them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub field_ids: Vec<String>,
}

impl Step {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            field_ids: Vec::new(),
        }
    }
}

impl NamedEntity for Step {
    fn name(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub layout: FormLayout,
    #[serde(default)]
    pub form_width: FormWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_image: Option<String>,
    #[serde(default = "FormSchema::default_show_title")]
    pub show_title: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "FormSchema::schema_version_default")]
    pub schema_version: u8,
}

impl FormSchema {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            layout: FormLayout::default(),
            form_width: FormWidth::default(),
            header_image: None,
            side_image: None,
            show_title: Self::default_show_title(),
            steps: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_layout(mut self, layout: FormLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.id == id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn default_show_title() -> bool {
        true
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl NamedEntity for FormSchema {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Displayable for FormSchema {
    fn display_label(&self) -> String {
        format!("{} ({} fields, {})", self.title, self.fields.len(), self.layout)
    }
}
