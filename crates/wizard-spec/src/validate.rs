use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::draft::Draft;
use crate::spec::field::{Constraint, FieldSpec, FieldValue};
use crate::spec::step::{CrossFieldCheck, CrossFieldRule, StepSpec};
use crate::spec::wizard::WizardSpec;

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Aggregate outcome of validating a step or a whole draft. Recomputed on
/// every attempt, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            missing_required: Vec::new(),
            unknown_fields: Vec::new(),
        }
    }

    fn from_parts(
        errors: Vec<ValidationError>,
        missing_required: Vec<String>,
        unknown_fields: Vec<String>,
    ) -> Self {
        Self {
            valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
            errors,
            missing_required,
            unknown_fields,
        }
    }

    /// Union of two results; valid only when both are.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        for key in other.missing_required {
            if !self.missing_required.contains(&key) {
                self.missing_required.push(key);
            }
        }
        for key in other.unknown_fields {
            if !self.unknown_fields.contains(&key) {
                self.unknown_fields.push(key);
            }
        }
        self
    }

    /// Error codes recorded against one field key.
    pub fn codes_for(&self, key: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == key)
            .map(|error| error.code.as_str())
            .collect()
    }
}

/// Validate the fields one step owns, plus its cross-field rules.
pub fn validate_step(step: &StepSpec, draft: &Draft) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for field in &step.fields {
        match draft.get(&field.key) {
            None => {
                if field.required {
                    missing_required.push(field.key.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    for rule in &step.checks {
        apply_check(rule, draft, &mut errors, &mut missing_required);
    }

    ValidationResult::from_parts(errors, missing_required, Vec::new())
}

/// Defensive whole-draft validation: every step re-checked, plus detection
/// of keys no step declares. Used by the final submission gate.
pub fn validate_all(spec: &WizardSpec, draft: &Draft) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for step in &spec.steps {
        result = result.merge(validate_step(step, draft));
    }

    let declared = spec.field_keys();
    let unknown_fields: Vec<String> = draft
        .keys()
        .filter(|key| !declared.contains(key.as_str()))
        .cloned()
        .collect();

    result.merge(ValidationResult::from_parts(
        Vec::new(),
        Vec::new(),
        unknown_fields,
    ))
}

/// Check one supplied value against its declaration. Pure; never panics.
pub fn validate_value(field: &FieldSpec, value: &FieldValue) -> Option<ValidationError> {
    if value.kind() != field.kind {
        return Some(base_error(
            field,
            format!("expected {}", field.kind),
            "type_mismatch",
        ));
    }

    // NaN is rejected even on optional fields: a value was supplied, and it
    // is not a number.
    if let FieldValue::Number(number) = value
        && number.is_nan()
    {
        return Some(base_error(field, "value is not a number", "not_a_number"));
    }

    if let Some(constraint) = &field.constraint
        && let Some(error) = enforce_constraint(field, value, constraint)
    {
        return Some(error);
    }

    if let FieldValue::Select(text) = value
        && let Some(choices) = &field.choices
        && !choices.contains(text)
    {
        return Some(base_error(field, "not one of the choices", "choice_mismatch"));
    }

    None
}

fn enforce_constraint(
    field: &FieldSpec,
    value: &FieldValue,
    constraint: &Constraint,
) -> Option<ValidationError> {
    if let Some(pattern) = &constraint.pattern
        && let Some(text) = value.as_text()
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return Some(base_error(
            field,
            "value does not match pattern",
            "pattern_mismatch",
        ));
    }

    if let Some(min_len) = constraint.min_len
        && let Some(text) = value.as_text()
        && text.chars().count() < min_len
    {
        return Some(base_error(
            field,
            format!("shorter than {} characters", min_len),
            "min_length",
        ));
    }

    if let Some(max_len) = constraint.max_len
        && let Some(text) = value.as_text()
        && text.chars().count() > max_len
    {
        return Some(base_error(
            field,
            format!("longer than {} characters", max_len),
            "max_length",
        ));
    }

    if let Some(min) = constraint.min
        && let Some(number) = value.as_f64()
        && number < min
    {
        return Some(base_error(field, "value below minimum", "min"));
    }

    if let Some(max) = constraint.max
        && let Some(number) = value.as_f64()
        && number > max
    {
        return Some(base_error(field, "value above maximum", "max"));
    }

    if let FieldValue::Files(files) = value {
        if let Some(min_items) = constraint.min_items
            && files.len() < min_items
        {
            return Some(base_error(
                field,
                format!("fewer than {} attachments", min_items),
                "min_items",
            ));
        }
        if let Some(max_items) = constraint.max_items
            && files.len() > max_items
        {
            return Some(base_error(
                field,
                format!("more than {} attachments", max_items),
                "max_items",
            ));
        }
        if let Some(max_file_bytes) = constraint.max_file_bytes
            && let Some(file) = files.iter().find(|file| file.size_bytes > max_file_bytes)
        {
            return Some(base_error(
                field,
                format!("'{}' exceeds {} bytes", file.name, max_file_bytes),
                "file_too_large",
            ));
        }
    }

    None
}

fn apply_check(
    rule: &CrossFieldRule,
    draft: &Draft,
    errors: &mut Vec<ValidationError>,
    missing_required: &mut Vec<String>,
) {
    match &rule.check {
        CrossFieldCheck::TimeAfter { earlier, later } => {
            match (draft.get(earlier), draft.get(later)) {
                (Some(FieldValue::Time(start)), Some(FieldValue::Time(end))) => {
                    if end <= start {
                        errors.push(ValidationError {
                            field: later.clone(),
                            message: rule.message.clone(),
                            code: "after".into(),
                        });
                    }
                }
                // Wrongly-typed values are already reported per field.
                (Some(_), Some(_)) => {}
                (start, end) => {
                    report_absent(earlier, start.is_none(), missing_required);
                    report_absent(later, end.is_none(), missing_required);
                }
            }
        }
        CrossFieldCheck::DateAfter { earlier, later } => {
            match (draft.get(earlier), draft.get(later)) {
                (Some(FieldValue::Date(start)), Some(FieldValue::Date(end))) => {
                    if end <= start {
                        errors.push(ValidationError {
                            field: later.clone(),
                            message: rule.message.clone(),
                            code: "after".into(),
                        });
                    }
                }
                (Some(_), Some(_)) => {}
                (start, end) => {
                    report_absent(earlier, start.is_none(), missing_required);
                    report_absent(later, end.is_none(), missing_required);
                }
            }
        }
        CrossFieldCheck::AtLeast { smaller, larger } => {
            match (draft.get(smaller), draft.get(larger)) {
                (Some(low), Some(high)) => {
                    if let (Some(low), Some(high)) = (low.as_f64(), high.as_f64())
                        && high < low
                    {
                        errors.push(ValidationError {
                            field: larger.clone(),
                            message: rule.message.clone(),
                            code: "at_least".into(),
                        });
                    }
                }
                (low, high) => {
                    report_absent(smaller, low.is_none(), missing_required);
                    report_absent(larger, high.is_none(), missing_required);
                }
            }
        }
        CrossFieldCheck::RequiredWhen {
            field,
            equals,
            then_required,
        } => {
            if draft.get(field) == Some(equals) {
                for key in then_required {
                    report_absent(key, !draft.contains(key), missing_required);
                }
            }
        }
    }
}

// Absence of a cross-check participant is a missing-field entry on that
// field, not a cross-field error.
fn report_absent(key: &str, absent: bool, missing_required: &mut Vec<String>) {
    if absent && !missing_required.iter().any(|entry| entry == key) {
        missing_required.push(key.to_string());
    }
}

fn base_error(field: &FieldSpec, message: impl Into<String>, code: &str) -> ValidationError {
    ValidationError {
        field: field.key.clone(),
        message: message.into(),
        code: code.into(),
    }
}
