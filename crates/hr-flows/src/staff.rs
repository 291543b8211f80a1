use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use wizard_spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, Draft, FieldKind, FieldSpec, FieldValue, FileRef,
    StepSpec, WizardSpec,
};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// HR manager account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrManager {
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub access_level: String,
}

impl HrManager {
    pub fn seed(&self) -> Draft {
        Draft::new()
            .with("full_name", FieldValue::text(self.full_name.as_str()))
            .with("email", FieldValue::text(self.email.as_str()))
            .with("department", FieldValue::select(self.department.as_str()))
            .with("start_date", FieldValue::Date(self.start_date))
            .with("access_level", FieldValue::select(self.access_level.as_str()))
    }
}

/// Compliance officer account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceOfficer {
    pub full_name: String,
    pub email: String,
    pub certification_id: String,
    pub appointed_on: NaiveDate,
    pub valid_until: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<FileRef>,
}

impl ComplianceOfficer {
    pub fn seed(&self) -> Draft {
        let mut draft = Draft::new()
            .with("full_name", FieldValue::text(self.full_name.as_str()))
            .with("email", FieldValue::text(self.email.as_str()))
            .with(
                "certification_id",
                FieldValue::text(self.certification_id.as_str()),
            )
            .with("appointed_on", FieldValue::Date(self.appointed_on))
            .with("valid_until", FieldValue::Date(self.valid_until));
        if !self.certificates.is_empty() {
            draft.insert("certificates", FieldValue::Files(self.certificates.clone()));
        }
        draft
    }
}

// Both staff wizards open with the same person screen.
fn person_step() -> StepSpec {
    StepSpec::new("person", "Person")
        .with_field(
            FieldSpec::new("full_name", "Full name", FieldKind::Text)
                .required()
                .with_constraint(Constraint {
                    min_len: Some(2),
                    max_len: Some(120),
                    ..Default::default()
                }),
        )
        .with_field(
            FieldSpec::new("email", "Work email", FieldKind::Text)
                .required()
                .with_constraint(Constraint {
                    pattern: Some(EMAIL_PATTERN.into()),
                    ..Default::default()
                }),
        )
}

/// Two-step HR manager provisioning: person, assignment.
pub fn hr_manager_wizard() -> WizardSpec {
    WizardSpec::new("hr-manager", "HR Manager", "1.0.1")
        .with_step(person_step())
        .with_step(
            StepSpec::new("assignment", "Assignment")
                .with_field(FieldSpec::select(
                    "department",
                    "Department",
                    vec![
                        "people-ops".into(),
                        "recruiting".into(),
                        "payroll".into(),
                    ],
                ))
                .with_field(FieldSpec::new("start_date", "Start date", FieldKind::Date).required())
                .with_field(
                    FieldSpec::select(
                        "access_level",
                        "Access level",
                        vec!["standard".into(), "elevated".into()],
                    )
                    .with_default(FieldValue::select("standard")),
                ),
        )
}

/// Two-step compliance officer provisioning: person, certification.
pub fn compliance_officer_wizard() -> WizardSpec {
    WizardSpec::new("compliance-officer", "Compliance Officer", "1.0.1")
        .with_step(person_step())
        .with_step(
            StepSpec::new("certification", "Certification")
                .with_field(
                    FieldSpec::new("certification_id", "Certification ID", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            pattern: Some(r"^[A-Z]{2,4}-[0-9]{4,8}$".into()),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("appointed_on", "Appointed on", FieldKind::Date).required(),
                )
                .with_field(
                    FieldSpec::new("valid_until", "Valid until", FieldKind::Date).required(),
                )
                .with_field(
                    FieldSpec::new("certificates", "Certificates", FieldKind::Files)
                        .required()
                        .with_constraint(Constraint {
                            min_items: Some(1),
                            max_items: Some(3),
                            ..Default::default()
                        }),
                )
                .with_check(CrossFieldRule::new(
                    "certification must outlive the appointment date",
                    CrossFieldCheck::DateAfter {
                        earlier: "appointed_on".into(),
                        later: "valid_until".into(),
                    },
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_spec::validate_step;

    fn date(text: &str) -> FieldValue {
        FieldValue::Date(NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid date"))
    }

    #[test]
    fn declarations_are_valid() {
        hr_manager_wizard().ensure_valid().expect("hr manager");
        compliance_officer_wizard()
            .ensure_valid()
            .expect("compliance officer");
    }

    #[test]
    fn expired_certification_fails_on_valid_until() {
        let spec = compliance_officer_wizard();
        let step = spec.step(1).expect("certification step");
        let draft = Draft::new()
            .with("certification_id", FieldValue::text("ISO-20260"))
            .with("appointed_on", date("2026-05-01"))
            .with("valid_until", date("2026-04-01"))
            .with(
                "certificates",
                FieldValue::Files(vec![FileRef::new("iso.pdf", 120_000)]),
            );
        let result = validate_step(step, &draft);
        assert_eq!(result.codes_for("valid_until"), vec!["after"]);
    }
}
