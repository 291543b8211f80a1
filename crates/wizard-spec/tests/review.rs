use chrono::NaiveTime;

use wizard_spec::{
    Draft, FieldKind, FieldSpec, FieldValue, StepSpec, WizardSpec, build_review_payload,
    render_json, render_text,
};

fn two_step_wizard() -> WizardSpec {
    WizardSpec::new("onboard", "Onboarding", "1.0.0")
        .with_step(
            StepSpec::new("identity", "Identity")
                .with_field(FieldSpec::new("name", "Name", FieldKind::Text).required()),
        )
        .with_step(
            StepSpec::new("schedule", "Schedule")
                .with_field(FieldSpec::new("start", "Start", FieldKind::Time).required())
                .with_field(FieldSpec::new("salary", "Salary", FieldKind::Currency)),
        )
}

#[test]
fn payload_counts_progress_over_declared_keys() {
    let draft = Draft::new()
        .with("name", FieldValue::text("Alice"))
        .with("undeclared", FieldValue::text("x"));
    let payload = build_review_payload(&two_step_wizard(), &draft);
    assert_eq!(payload.progress.answered, 1);
    assert_eq!(payload.progress.total, 3);
}

#[test]
fn payload_marks_incomplete_steps() {
    let draft = Draft::new().with("name", FieldValue::text("Alice"));
    let payload = build_review_payload(&two_step_wizard(), &draft);
    assert!(payload.steps[0].complete);
    assert!(!payload.steps[1].complete);
}

#[test]
fn values_are_formatted_for_display() {
    let draft = Draft::new()
        .with("name", FieldValue::text("Alice"))
        .with(
            "start",
            FieldValue::Time(NaiveTime::from_hms_opt(9, 30, 0).expect("valid time")),
        )
        .with("salary", FieldValue::currency(525_000, "USD"));
    let payload = build_review_payload(&two_step_wizard(), &draft);

    let schedule = &payload.steps[1];
    assert_eq!(schedule.fields[0].value.as_deref(), Some("09:30"));
    assert_eq!(schedule.fields[1].value.as_deref(), Some("USD 5250.00"));
}

#[test]
fn render_text_lists_unset_fields() {
    let payload = build_review_payload(&two_step_wizard(), &Draft::new());
    let text = render_text(&payload);
    assert!(text.contains("Wizard: Onboarding"));
    assert!(text.contains("(not set)"));
    assert!(text.contains("[incomplete]"));
}

#[test]
fn render_json_exposes_structure() {
    let draft = Draft::new().with("name", FieldValue::text("Alice"));
    let payload = build_review_payload(&two_step_wizard(), &draft);
    let value = render_json(&payload);
    assert_eq!(value["wizard_id"], "onboard");
    assert_eq!(value["progress"]["answered"], 1);
    let steps = value["steps"].as_array().expect("steps array");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["fields"][0]["value"], "Alice");
}
