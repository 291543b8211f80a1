use serde_json::{Value, json};

use crate::draft::Draft;
use crate::spec::wizard::WizardSpec;
use crate::validate::validate_step;

/// Progress counters exposed to review screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewProgress {
    pub answered: usize,
    pub total: usize,
}

/// One field as shown on the review screen.
#[derive(Debug, Clone)]
pub struct ReviewField {
    pub key: String,
    pub label: String,
    pub value: Option<String>,
}

/// One step section of the review screen.
#[derive(Debug, Clone)]
pub struct ReviewStep {
    pub id: String,
    pub title: String,
    pub complete: bool,
    pub fields: Vec<ReviewField>,
}

/// Collected payload used by both text and JSON review renderers.
#[derive(Debug, Clone)]
pub struct ReviewPayload {
    pub wizard_id: String,
    pub wizard_title: String,
    pub wizard_version: String,
    pub progress: ReviewProgress,
    pub steps: Vec<ReviewStep>,
}

/// Build the review payload from the wizard definition and the current draft.
pub fn build_review_payload(spec: &WizardSpec, draft: &Draft) -> ReviewPayload {
    let declared = spec.field_keys();
    let answered = draft
        .keys()
        .filter(|key| declared.contains(key.as_str()))
        .count();

    let steps = spec
        .steps
        .iter()
        .map(|step| ReviewStep {
            id: step.id.clone(),
            title: step.title.clone(),
            complete: validate_step(step, draft).valid,
            fields: step
                .fields
                .iter()
                .map(|field| ReviewField {
                    key: field.key.clone(),
                    label: field.label.clone(),
                    value: draft.get(&field.key).map(|value| value.display()),
                })
                .collect(),
        })
        .collect();

    ReviewPayload {
        wizard_id: spec.id.clone(),
        wizard_title: spec.title.clone(),
        wizard_version: spec.version.clone(),
        progress: ReviewProgress {
            answered,
            total: declared.len(),
        },
        steps,
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json(payload: &ReviewPayload) -> Value {
    let steps = payload
        .steps
        .iter()
        .map(|step| {
            let fields = step
                .fields
                .iter()
                .map(|field| {
                    json!({
                        "key": field.key,
                        "label": field.label,
                        "value": field.value,
                    })
                })
                .collect::<Vec<_>>();
            json!({
                "id": step.id,
                "title": step.title,
                "complete": step.complete,
                "fields": fields,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "wizard_id": payload.wizard_id,
        "wizard_title": payload.wizard_title,
        "wizard_version": payload.wizard_version,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "steps": steps,
    })
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &ReviewPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Wizard: {} ({})",
        payload.wizard_title, payload.wizard_id
    ));
    lines.push(format!(
        "Progress: {}/{}",
        payload.progress.answered, payload.progress.total
    ));

    for step in &payload.steps {
        let marker = if step.complete { "ok" } else { "incomplete" };
        lines.push(format!("{} [{}]", step.title, marker));
        for field in &step.fields {
            match &field.value {
                Some(value) => lines.push(format!(" - {}: {}", field.label, value)),
                None => lines.push(format!(" - {}: (not set)", field.label)),
            }
        }
    }

    lines.join("\n")
}
