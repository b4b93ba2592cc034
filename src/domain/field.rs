//! Domain types describing a single form element.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

pub const FULL_WIDTH: u8 = 2;
pub const HALF_WIDTH: u8 = 1;

const DEFAULT_CHOICE_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];
const DEFAULT_SLIDER_MIN: f64 = 0.0;
const DEFAULT_SLIDER_MAX: f64 = 100.0;

/// Every element kind a form can contain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Section,
    Text,
    Textarea,
    Email,
    Phone,
    Number,
    Date,
    Datetime,
    Yesno,
    Dropdown,
    Radio,
    Checklist,
    Checkbox,
    Attachment,
    Image,
    Slider,
    Signature,
    Hidden,
    Table,
    Profiles,
}

impl FieldType {
    pub const ALL: [FieldType; 20] = [
        FieldType::Section,
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Number,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Yesno,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::Checklist,
        FieldType::Checkbox,
        FieldType::Attachment,
        FieldType::Image,
        FieldType::Slider,
        FieldType::Signature,
        FieldType::Hidden,
        FieldType::Table,
        FieldType::Profiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Section => "section",
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Yesno => "yesno",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checklist => "checklist",
            FieldType::Checkbox => "checkbox",
            FieldType::Attachment => "attachment",
            FieldType::Image => "image",
            FieldType::Slider => "slider",
            FieldType::Signature => "signature",
            FieldType::Hidden => "hidden",
            FieldType::Table => "table",
            FieldType::Profiles => "profiles",
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, FieldType::Section)
    }

    /// Types whose answer is picked from `options`.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::Radio | FieldType::Checklist
        )
    }

    /// Section headers and hidden values never take user input, so `required`
    /// has no effect on them.
    pub fn is_required_exempt(&self) -> bool {
        matches!(self, FieldType::Section | FieldType::Hidden)
    }

    pub fn default_col_span(&self) -> u8 {
        match self {
            FieldType::Section | FieldType::Textarea => FULL_WIDTH,
            _ => HALF_WIDTH,
        }
    }

    pub fn default_label(&self) -> String {
        match self {
            FieldType::Section => "New Section".into(),
            FieldType::Yesno => "New Yes/No field".into(),
            other => {
                let raw = other.as_str();
                let mut chars = raw.chars();
                let capitalized: String = match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                };
                format!("New {} field", capitalized)
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldType(pub String);

impl fmt::Display for UnknownFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field type `{}`", self.0)
    }
}

impl std::error::Error for UnknownFieldType {}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        FieldType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownFieldType(value.trim().to_string()))
    }
}

/// Comparison applied by a [`ConditionalRule`].
///
/// Unrecognized operators survive deserialization as [`ConditionOperator::Unknown`]
/// so that a rule written by a newer builder still loads and evaluates as visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    IsEmpty,
    IsNotEmpty,
    Unknown(String),
}

impl ConditionOperator {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionOperator::Equals => "equals",
            ConditionOperator::NotEquals => "not_equals",
            ConditionOperator::Contains => "contains",
            ConditionOperator::IsEmpty => "is_empty",
            ConditionOperator::IsNotEmpty => "is_not_empty",
            ConditionOperator::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(value: String) -> Self {
        match value.as_str() {
            "equals" => ConditionOperator::Equals,
            "not_equals" => ConditionOperator::NotEquals,
            "contains" => ConditionOperator::Contains,
            "is_empty" => ConditionOperator::IsEmpty,
            "is_not_empty" => ConditionOperator::IsNotEmpty,
            _ => ConditionOperator::Unknown(value),
        }
    }
}

impl From<&str> for ConditionOperator {
    fn from(value: &str) -> Self {
        ConditionOperator::from(value.to_string())
    }
}

impl From<ConditionOperator> for String {
    fn from(operator: ConditionOperator) -> Self {
        match operator {
            ConditionOperator::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility predicate referencing another field's current value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    #[serde(default)]
    pub field_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: String,
}

impl ConditionalRule {
    pub fn new(
        field_id: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Optional value constraints attached to a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldValidation {
    pub fn max_length(limit: usize) -> Self {
        Self {
            max_length: Some(limit),
            ..Self::default()
        }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }
}

/// One element of a form.
///
/// Loading goes through [`FieldRecord`] so a stored `colSpan` is clamped and a
/// missing one falls back to the type's default width.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "FieldRecord")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub col_span: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_as_step: Option<bool>,
}

/// Wire shape of a stored [`Field`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldRecord {
    id: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    label: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    col_span: Option<u8>,
    #[serde(default)]
    validation: Option<FieldValidation>,
    #[serde(default)]
    conditional: Option<ConditionalRule>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    section_background_color: Option<String>,
    #[serde(default)]
    section_background_image: Option<String>,
    #[serde(default)]
    use_as_step: Option<bool>,
}

impl From<FieldRecord> for Field {
    fn from(record: FieldRecord) -> Self {
        let col_span = record
            .col_span
            .map(clamp_col_span)
            .unwrap_or_else(|| record.field_type.default_col_span());
        Self {
            id: record.id,
            field_type: record.field_type,
            label: record.label,
            required: record.required,
            placeholder: record.placeholder,
            options: record.options,
            col_span,
            validation: record.validation,
            conditional: record.conditional,
            description: record.description,
            section_background_color: record.section_background_color,
            section_background_image: record.section_background_image,
            use_as_step: record.use_as_step,
        }
    }
}

impl Field {
    /// Creates a field with the defaults the builder applies for `field_type`.
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        let options = if field_type.is_choice() {
            DEFAULT_CHOICE_OPTIONS.iter().map(|o| o.to_string()).collect()
        } else {
            Vec::new()
        };
        let validation = match field_type {
            FieldType::Slider => Some(FieldValidation::range(
                DEFAULT_SLIDER_MIN,
                DEFAULT_SLIDER_MAX,
            )),
            _ => None,
        };
        Self {
            id: id.into(),
            field_type,
            label: field_type.default_label(),
            required: false,
            placeholder: None,
            options,
            col_span: field_type.default_col_span(),
            validation,
            conditional: None,
            description: None,
            section_background_color: None,
            section_background_image: None,
            use_as_step: None,
        }
    }

    /// Same as [`Field::new`] with a freshly generated id.
    pub fn with_generated_id(field_type: FieldType) -> Self {
        Self::new(Self::generate_id(), field_type)
    }

    pub fn generate_id() -> String {
        format!("field_{}", Uuid::new_v4().simple())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_col_span(mut self, col_span: u8) -> Self {
        self.col_span = clamp_col_span(col_span);
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_conditional(mut self, rule: ConditionalRule) -> Self {
        self.conditional = Some(rule);
        self
    }

    pub fn with_use_as_step(mut self, use_as_step: bool) -> Self {
        self.use_as_step = Some(use_as_step);
        self
    }

    pub fn is_section(&self) -> bool {
        self.field_type.is_section()
    }

    pub fn is_full_width(&self) -> bool {
        self.col_span >= FULL_WIDTH
    }

    /// Sections count as wizard step boundaries unless explicitly opted out.
    pub fn starts_step(&self) -> bool {
        self.is_section() && self.use_as_step != Some(false)
    }
}

impl NamedEntity for Field {
    fn name(&self) -> &str {
        &self.label
    }
}

impl Displayable for Field {
    fn display_label(&self) -> String {
        let marker = if self.required && !self.field_type.is_required_exempt() {
            "*"
        } else {
            ""
        };
        format!("{}{} ({})", self.label, marker, self.field_type)
    }
}

pub fn clamp_col_span(col_span: u8) -> u8 {
    if col_span >= FULL_WIDTH {
        FULL_WIDTH
    } else {
        HALF_WIDTH
    }
}

/// Partial update applied by `update_field`.
///
/// Absent members leave the field untouched. For nullable attributes an explicit
/// JSON `null` clears the attribute, which is why those members are double options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub placeholder: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u8>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation: Option<Option<FieldValidation>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditional: Option<Option<ConditionalRule>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_background_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_background_image: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_as_step: Option<Option<bool>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &FieldPatch::default()
    }

    /// Merges the present members into `field`. Ids and types are never patched.
    pub fn apply_to(self, field: &mut Field) {
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(options) = self.options {
            field.options = options;
        }
        if let Some(col_span) = self.col_span {
            field.col_span = clamp_col_span(col_span);
        }
        if let Some(validation) = self.validation {
            field.validation = validation;
        }
        if let Some(conditional) = self.conditional {
            field.conditional = conditional;
        }
        if let Some(description) = self.description {
            field.description = description;
        }
        if let Some(color) = self.section_background_color {
            field.section_background_color = color;
        }
        if let Some(image) = self.section_background_image {
            field.section_background_image = image;
        }
        if let Some(use_as_step) = self.use_as_step {
            field.use_as_step = use_as_step;
        }
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_and_textareas_default_to_full_width() {
        assert_eq!(Field::new("s", FieldType::Section).col_span, 2);
        assert_eq!(Field::new("t", FieldType::Textarea).col_span, 2);
        assert_eq!(Field::new("e", FieldType::Email).col_span, 1);
    }

    #[test]
    fn choice_fields_receive_default_options() {
        let field = Field::new("d", FieldType::Dropdown);
        assert_eq!(field.options, vec!["Option 1", "Option 2"]);
        assert!(Field::new("t", FieldType::Text).options.is_empty());
    }

    #[test]
    fn field_serializes_with_camel_case_keys() {
        let field = Field::new("name", FieldType::Text).with_col_span(2);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["colSpan"], 2);
        assert!(json.get("useAsStep").is_none());
    }

    #[test]
    fn unknown_operator_survives_deserialization() {
        let rule: ConditionalRule = serde_json::from_str(
            r#"{"fieldId":"a","operator":"greater_than","value":"3"}"#,
        )
        .unwrap();
        assert_eq!(
            rule.operator,
            ConditionOperator::Unknown("greater_than".into())
        );
        let back = serde_json::to_value(&rule).unwrap();
        assert_eq!(back["operator"], "greater_than");
    }

    #[test]
    fn patch_null_clears_optional_attributes() {
        let mut field = Field::new("a", FieldType::Text);
        field.placeholder = Some("Type here".into());
        let patch: FieldPatch =
            serde_json::from_str(r#"{"placeholder":null,"label":"Name"}"#).unwrap();
        patch.apply_to(&mut field);
        assert_eq!(field.placeholder, None);
        assert_eq!(field.label, "Name");
    }

    #[test]
    fn patch_clamps_col_span() {
        let mut field = Field::new("a", FieldType::Text);
        FieldPatch {
            col_span: Some(7),
            ..FieldPatch::default()
        }
        .apply_to(&mut field);
        assert_eq!(field.col_span, 2);
    }

    #[test]
    fn loaded_col_span_is_clamped() {
        let field: Field =
            serde_json::from_str(r#"{"id":"a","type":"text","colSpan":7}"#).unwrap();
        assert_eq!(field.col_span, 2);
        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["colSpan"], 2);

        let field: Field =
            serde_json::from_str(r#"{"id":"a","type":"text","colSpan":0}"#).unwrap();
        assert_eq!(field.col_span, 1);
    }

    #[test]
    fn missing_col_span_uses_the_type_width() {
        let textarea: Field = serde_json::from_str(r#"{"id":"t","type":"textarea"}"#).unwrap();
        let section: Field = serde_json::from_str(r#"{"id":"s","type":"section"}"#).unwrap();
        let text: Field = serde_json::from_str(r#"{"id":"b","type":"text"}"#).unwrap();
        assert_eq!(textarea.col_span, 2);
        assert_eq!(section.col_span, 2);
        assert_eq!(text.col_span, 1);
    }

    #[test]
    fn field_type_parses_case_insensitively() {
        assert_eq!("YesNo".parse::<FieldType>(), Ok(FieldType::Yesno));
        assert!("matrix".parse::<FieldType>().is_err());
    }
}
