use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::field::FieldValue;
use crate::spec::wizard::WizardSpec;

/// Whether a session creates a new entity or amends an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    Create,
    Edit,
}

/// Accumulated, in-progress value of a multi-step form.
///
/// An absent key means "not set"; the engine never coerces absence to an
/// empty string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Draft {
    fields: BTreeMap<String, FieldValue>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting draft for a session. Create mode starts empty (or with the
    /// declared defaults when the policy opts in); edit mode copies exactly
    /// the declared keys present on the seed and drops everything else.
    pub fn init(spec: &WizardSpec, mode: WizardMode, seed: Option<&Draft>) -> Self {
        let mut draft = Draft::new();
        match mode {
            WizardMode::Create => {
                if spec.policy.autofill_defaults {
                    for step in &spec.steps {
                        for field in &step.fields {
                            if let Some(default) = &field.default {
                                draft.insert(field.key.clone(), default.clone());
                            }
                        }
                    }
                }
            }
            WizardMode::Edit => {
                if let Some(seed) = seed {
                    for (key, value) in seed.iter() {
                        if spec.field(key).is_some() {
                            draft.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }
        draft
    }

    /// Shallow merge returning a new draft; keys in `partial` overwrite,
    /// unrelated keys are preserved. Never mutates either input.
    pub fn merged(&self, partial: &Draft) -> Draft {
        let mut fields = self.fields.clone();
        for (key, value) in &partial.fields {
            fields.insert(key.clone(), value.clone());
        }
        Draft { fields }
    }

    /// Builder-style insert used by seeds and tests.
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.insert(key.into(), value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Drop keys no step declares. Used when restoring a persisted snapshot
    /// against a possibly newer wizard definition.
    pub fn retain_declared(&mut self, spec: &WizardSpec) {
        self.fields.retain(|key, _| spec.field(key).is_some());
    }

    /// Compact snapshot for draft persistence between sessions.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(bytes)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, FieldValue)> for Draft {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Draft {
            fields: iter.into_iter().collect(),
        }
    }
}
