use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque reference to an uploaded attachment. Contents are never inspected,
/// only presence, count, and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileRef {
    pub name: String,
    pub size_bytes: u64,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// A single field value, tagged by semantic type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    Select(String),
    Currency { minor_units: i64, code: String },
    Files(Vec<FileRef>),
    Group(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn select(value: impl Into<String>) -> Self {
        FieldValue::Select(value.into())
    }

    pub fn currency(minor_units: i64, code: impl Into<String>) -> Self {
        FieldValue::Currency {
            minor_units,
            code: code.into(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Time(_) => FieldKind::Time,
            FieldValue::Select(_) => FieldKind::Select,
            FieldValue::Currency { .. } => FieldKind::Currency,
            FieldValue::Files(_) => FieldKind::Files,
            FieldValue::Group(_) => FieldKind::Group,
        }
    }

    /// Textual content for pattern and length constraints.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) | FieldValue::Select(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric magnitude for range constraints. Currency amounts compare by
    /// their minor units.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Currency { minor_units, .. } => Some(*minor_units as f64),
            _ => None,
        }
    }

    /// Human-friendly rendering used by review summaries.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) | FieldValue::Select(text) => text.clone(),
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Flag(flag) => if *flag { "yes" } else { "no" }.to_string(),
            FieldValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            FieldValue::Time(time) => time.format("%H:%M").to_string(),
            FieldValue::Currency { minor_units, code } => {
                let sign = if *minor_units < 0 { "-" } else { "" };
                let magnitude = minor_units.unsigned_abs();
                format!("{} {}{}.{:02}", code, sign, magnitude / 100, magnitude % 100)
            }
            FieldValue::Files(files) => files
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Group(entries) => format!("{} entries", entries.len()),
        }
    }
}

/// Declared semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Flag,
    Date,
    Time,
    Select,
    Currency,
    Files,
    Group,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Flag => "flag",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
            FieldKind::Select => "select",
            FieldKind::Currency => "currency",
            FieldKind::Files => "files",
            FieldKind::Group => "group",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds applied to a field value beyond its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Constraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<u64>,
}

/// Declaration of one field owned by a wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            choices: None,
            default: None,
            constraint: None,
        }
    }

    /// Select field with its closed choice list.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        choices: Vec<String>,
    ) -> Self {
        Self {
            choices: Some(choices),
            ..Self::new(key, label, FieldKind::Select)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
}
