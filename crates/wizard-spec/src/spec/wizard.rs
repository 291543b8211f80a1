use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::field::{FieldKind, FieldSpec};
use crate::spec::step::StepSpec;

/// Execution policies shared by every session of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WizardPolicy {
    /// Ask before discarding a dirty draft on cancel.
    #[serde(default = "default_confirm_discard")]
    pub confirm_discard: bool,
    /// Pre-fill declared defaults when a create-mode draft starts.
    #[serde(default)]
    pub autofill_defaults: bool,
}

fn default_confirm_discard() -> bool {
    true
}

impl Default for WizardPolicy {
    fn default() -> Self {
        Self {
            confirm_discard: true,
            autofill_defaults: false,
        }
    }
}

/// Problems detected in a wizard declaration before any session runs.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("wizard '{0}' declares no steps")]
    NoSteps(String),
    #[error("step '{0}' declares no fields")]
    EmptyStep(String),
    #[error("field key cannot be empty in step '{0}'")]
    EmptyKey(String),
    #[error("duplicate field key '{0}'")]
    DuplicateKey(String),
    #[error("select field '{0}' must declare choices")]
    MissingChoices(String),
    #[error("field '{0}' declares inverted bounds")]
    InvertedBounds(String),
    #[error("rule '{rule}' in step '{step}' references unknown field '{field}'")]
    UnknownRuleField {
        step: String,
        rule: String,
        field: String,
    },
}

/// Top-level wizard definition: an ordered, immutable sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WizardSpec {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub policy: WizardPolicy,
    pub steps: Vec<StepSpec>,
}

impl WizardSpec {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            version: version.into(),
            policy: WizardPolicy::default(),
            steps: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: WizardPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_step(mut self, step: StepSpec) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step(&self, index: usize) -> Option<&StepSpec> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Union of every step's declared keys.
    pub fn field_keys(&self) -> BTreeSet<&str> {
        self.steps
            .iter()
            .flat_map(|step| step.fields.iter().map(|field| field.key.as_str()))
            .collect()
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.steps.iter().find_map(|step| step.field(key))
    }

    /// Reject declarations that no session could run correctly.
    pub fn ensure_valid(&self) -> Result<(), SpecError> {
        if self.steps.is_empty() {
            return Err(SpecError::NoSteps(self.id.clone()));
        }

        let mut seen = BTreeSet::new();
        for step in &self.steps {
            if step.fields.is_empty() {
                return Err(SpecError::EmptyStep(step.id.clone()));
            }
            for field in &step.fields {
                if field.key.trim().is_empty() {
                    return Err(SpecError::EmptyKey(step.id.clone()));
                }
                if !seen.insert(field.key.clone()) {
                    return Err(SpecError::DuplicateKey(field.key.clone()));
                }
                if matches!(field.kind, FieldKind::Select) {
                    let has_choices = field
                        .choices
                        .as_ref()
                        .map(|choices| !choices.is_empty())
                        .unwrap_or(false);
                    if !has_choices {
                        return Err(SpecError::MissingChoices(field.key.clone()));
                    }
                }
                if let Some(constraint) = &field.constraint {
                    if let (Some(min), Some(max)) = (constraint.min, constraint.max)
                        && min > max
                    {
                        return Err(SpecError::InvertedBounds(field.key.clone()));
                    }
                    if let (Some(min_len), Some(max_len)) = (constraint.min_len, constraint.max_len)
                        && min_len > max_len
                    {
                        return Err(SpecError::InvertedBounds(field.key.clone()));
                    }
                    if let (Some(min_items), Some(max_items)) =
                        (constraint.min_items, constraint.max_items)
                        && min_items > max_items
                    {
                        return Err(SpecError::InvertedBounds(field.key.clone()));
                    }
                }
            }
        }

        for step in &self.steps {
            for rule in &step.checks {
                for key in rule.check.participants() {
                    if !seen.contains(key) {
                        return Err(SpecError::UnknownRuleField {
                            step: step.id.clone(),
                            rule: rule.id.clone().unwrap_or_else(|| "<unnamed>".into()),
                            field: key.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
