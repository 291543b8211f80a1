use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::{FieldSpec, FieldValue};

/// Predicate spanning more than one field of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CrossFieldCheck {
    /// `later` must be strictly after `earlier`; both are `Time` fields.
    TimeAfter { earlier: String, later: String },
    /// `later` must be strictly after `earlier`; both are `Date` fields.
    DateAfter { earlier: String, later: String },
    /// `larger` must be at least `smaller`; both carry numeric magnitudes
    /// (`Number` or `Currency`).
    AtLeast { smaller: String, larger: String },
    /// When `field` equals `equals`, every key in `then_required` must be present.
    RequiredWhen {
        field: String,
        equals: FieldValue,
        then_required: Vec<String>,
    },
}

impl CrossFieldCheck {
    /// Field keys this check reads.
    pub fn participants(&self) -> Vec<&str> {
        match self {
            CrossFieldCheck::TimeAfter { earlier, later }
            | CrossFieldCheck::DateAfter { earlier, later } => {
                vec![earlier.as_str(), later.as_str()]
            }
            CrossFieldCheck::AtLeast { smaller, larger } => {
                vec![smaller.as_str(), larger.as_str()]
            }
            CrossFieldCheck::RequiredWhen {
                field,
                then_required,
                ..
            } => {
                let mut keys = vec![field.as_str()];
                keys.extend(then_required.iter().map(String::as_str));
                keys
            }
        }
    }
}

/// Step-level rule with its user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CrossFieldRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub message: String,
    pub check: CrossFieldCheck,
}

impl CrossFieldRule {
    pub fn new(message: impl Into<String>, check: CrossFieldCheck) -> Self {
        Self {
            id: None,
            message: message.into(),
            check,
        }
    }
}

/// One screen of a wizard and the fields it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StepSpec {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CrossFieldRule>,
}

impl StepSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_check(mut self, check: CrossFieldRule) -> Self {
        self.checks.push(check);
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn field_keys(&self) -> BTreeSet<&str> {
        self.fields.iter().map(|field| field.key.as_str()).collect()
    }
}
