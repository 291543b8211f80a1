use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use hr_flows::{Company, attendance_wizard, company_wizard, vendor_wizard};
use wizard_engine::{
    ActionOutcome, InMemoryGateway, SessionStatus, SubmitError, WizardAction, WizardController,
};
use wizard_spec::{Draft, FieldValue, FileRef, WizardMode};

fn date(text: &str) -> FieldValue {
    FieldValue::Date(NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid date"))
}

fn time(hhmm: &str) -> FieldValue {
    FieldValue::Time(NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid time"))
}

fn set(
    controller: &WizardController<Arc<InMemoryGateway>>,
    key: &str,
    value: FieldValue,
) -> ActionOutcome {
    controller.dispatch(WizardAction::FieldChanged {
        key: key.into(),
        value,
    })
}

#[tokio::test]
async fn attendance_correction_walkthrough() {
    let gateway = Arc::new(InMemoryGateway::new());
    let controller =
        WizardController::create(attendance_wizard(), gateway.clone()).expect("spec");

    // one-character name is blocked at the first step
    set(&controller, "employee_name", FieldValue::text("A"));
    let ActionOutcome::Rejected(result) = controller.dispatch(WizardAction::Next) else {
        panic!("short name must not advance");
    };
    assert_eq!(result.codes_for("employee_name"), vec!["min_length"]);
    assert_eq!(controller.step_index(), 0);

    set(&controller, "employee_name", FieldValue::text("Al"));
    assert_eq!(
        controller.dispatch(WizardAction::Next),
        ActionOutcome::Advanced { to: 1 }
    );

    // check-out before check-in is blocked at the second step
    set(&controller, "work_date", date("2026-08-03"));
    set(&controller, "start_time", time("09:00"));
    set(&controller, "end_time", time("08:00"));
    let ActionOutcome::Rejected(result) = controller.dispatch(WizardAction::Next) else {
        panic!("inverted times must not advance");
    };
    assert_eq!(result.codes_for("end_time"), vec!["after"]);

    set(&controller, "end_time", time("18:00"));
    assert_eq!(
        controller.dispatch(WizardAction::Next),
        ActionOutcome::Advanced { to: 2 }
    );

    // correction type was pre-filled from its declared default
    assert_eq!(
        controller.draft().get("kind"),
        Some(&FieldValue::select("biometric"))
    );

    let review = controller.review();
    assert!(review.steps[0].complete);
    assert!(review.steps[1].complete);

    let id = controller.submit().await.expect("submit");
    assert_eq!(controller.status(), SessionStatus::Submitted);

    let saved = gateway.entity(&id).expect("persisted entity");
    assert_eq!(saved.get("employee_name"), Some(&FieldValue::text("Al")));
    assert_eq!(saved.get("start_time"), Some(&time("09:00")));
    assert_eq!(saved.get("end_time"), Some(&time("18:00")));
}

#[tokio::test]
async fn vendor_onboarding_creates_an_entity() {
    let gateway = Arc::new(InMemoryGateway::new());
    let controller = WizardController::create(vendor_wizard(), gateway.clone()).expect("spec");

    set(&controller, "legal_name", FieldValue::text("Acme Staffing"));
    set(&controller, "category", FieldValue::select("staffing"));
    set(&controller, "website", FieldValue::text("https://acme.example"));
    assert_eq!(
        controller.dispatch(WizardAction::Next),
        ActionOutcome::Advanced { to: 1 }
    );

    set(&controller, "contact_name", FieldValue::text("Dewi"));
    set(&controller, "email", FieldValue::text("dewi@acme.example"));
    assert_eq!(
        controller.dispatch(WizardAction::Next),
        ActionOutcome::Advanced { to: 2 }
    );

    set(&controller, "tax_id", FieldValue::text("TAX-001122"));
    set(
        &controller,
        "documents",
        FieldValue::Files(vec![FileRef::new("registration.pdf", 240_000)]),
    );

    let id = controller.submit().await.expect("submit");
    assert_eq!(gateway.entity_count(), 1);
    let saved = gateway.entity(&id).expect("persisted entity");
    assert_eq!(saved.get("category"), Some(&FieldValue::select("staffing")));
    // optional phone was never set and stays absent
    assert!(!saved.contains("phone"));
}

#[tokio::test]
async fn company_edit_amends_the_existing_record() {
    let gateway = Arc::new(InMemoryGateway::new());
    let company = Company {
        name: "Initech".into(),
        industry: "technology".into(),
        registered: false,
        registration_number: None,
        hq_country: "Indonesia".into(),
        hq_city: "Jakarta".into(),
        hq_postcode: None,
    };
    let id = wizard_engine::EntityId::new("company-1");
    gateway.insert_entity(id.clone(), company.seed());

    let controller = WizardController::edit(
        company_wizard(),
        gateway.clone(),
        id.clone(),
        &company.seed(),
    )
    .expect("spec");

    // flipping the flag retroactively requires the registration number
    set(&controller, "registered", FieldValue::Flag(true));
    let ActionOutcome::Rejected(result) = controller.dispatch(WizardAction::Next) else {
        panic!("missing registration number must not advance");
    };
    assert_eq!(result.missing_required, vec!["registration_number"]);

    set(
        &controller,
        "registration_number",
        FieldValue::text("PT-2026/0042"),
    );
    assert_eq!(
        controller.dispatch(WizardAction::Next),
        ActionOutcome::Advanced { to: 1 }
    );

    let saved_id = controller.submit().await.expect("submit");
    assert_eq!(saved_id, id);
    let saved = gateway.entity(&id).expect("persisted entity");
    assert_eq!(saved.get("registered"), Some(&FieldValue::Flag(true)));
    assert_eq!(
        saved.get("registration_number"),
        Some(&FieldValue::text("PT-2026/0042"))
    );
}

#[tokio::test]
async fn suspended_vendor_session_resumes_from_its_snapshot() {
    let gateway = Arc::new(InMemoryGateway::new());
    let controller = WizardController::create(vendor_wizard(), gateway.clone()).expect("spec");

    set(&controller, "legal_name", FieldValue::text("Acme Staffing"));
    set(&controller, "category", FieldValue::select("payroll"));
    controller.dispatch(WizardAction::Next);

    let step_index = controller.step_index();
    let bytes = controller
        .effective_draft()
        .to_cbor()
        .expect("snapshot encodes");
    drop(controller);

    let snapshot = Draft::from_cbor(&bytes).expect("snapshot decodes");
    let resumed = WizardController::resume(
        vendor_wizard(),
        gateway.clone(),
        WizardMode::Create,
        snapshot,
        step_index,
        None,
    )
    .expect("spec");

    assert_eq!(resumed.step_index(), 1);
    assert_eq!(
        resumed.draft().get("legal_name"),
        Some(&FieldValue::text("Acme Staffing"))
    );

    // an incomplete resumed draft still cannot be submitted
    let error = resumed.submit().await.expect_err("contact step incomplete");
    assert!(matches!(error, SubmitError::Invalid(_)));
}
