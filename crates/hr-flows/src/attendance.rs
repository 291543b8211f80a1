use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use wizard_spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, Draft, FieldKind, FieldSpec, FieldValue, StepSpec,
    WizardPolicy, WizardSpec,
};

/// Attendance correction request as stored once approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceCorrection {
    pub employee_name: String,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AttendanceCorrection {
    pub fn seed(&self) -> Draft {
        let mut draft = Draft::new()
            .with("employee_name", FieldValue::text(self.employee_name.as_str()))
            .with("work_date", FieldValue::Date(self.work_date))
            .with("start_time", FieldValue::Time(self.start_time))
            .with("end_time", FieldValue::Time(self.end_time))
            .with("kind", FieldValue::select(self.kind.as_str()));
        if let Some(note) = &self.note {
            draft.insert("note", FieldValue::text(note.as_str()));
        }
        draft
    }
}

/// Three-step attendance correction: employee, times, correction details.
/// Manual corrections must attach evidence; check-out must land after
/// check-in.
pub fn attendance_wizard() -> WizardSpec {
    WizardSpec::new("attendance-correction", "Attendance Correction", "1.4.0")
        .with_policy(WizardPolicy {
            autofill_defaults: true,
            ..Default::default()
        })
        .with_step(
            StepSpec::new("employee", "Employee").with_field(
                FieldSpec::new("employee_name", "Employee name", FieldKind::Text)
                    .required()
                    .with_constraint(Constraint {
                        min_len: Some(2),
                        max_len: Some(120),
                        ..Default::default()
                    }),
            ),
        )
        .with_step(
            StepSpec::new("times", "Times")
                .with_field(FieldSpec::new("work_date", "Date", FieldKind::Date).required())
                .with_field(FieldSpec::new("start_time", "Check-in", FieldKind::Time).required())
                .with_field(FieldSpec::new("end_time", "Check-out", FieldKind::Time).required())
                .with_check(CrossFieldRule::new(
                    "check-out must be after check-in",
                    CrossFieldCheck::TimeAfter {
                        earlier: "start_time".into(),
                        later: "end_time".into(),
                    },
                )),
        )
        .with_step(
            StepSpec::new("correction", "Correction")
                .with_field(
                    FieldSpec::select(
                        "kind",
                        "Correction type",
                        vec!["biometric".into(), "manual".into()],
                    )
                    .required()
                    .with_default(FieldValue::select("biometric")),
                )
                .with_field(
                    FieldSpec::new("evidence", "Evidence", FieldKind::Files).with_constraint(
                        Constraint {
                            max_items: Some(3),
                            max_file_bytes: Some(10 * 1024 * 1024),
                            ..Default::default()
                        },
                    ),
                )
                .with_field(
                    FieldSpec::new("note", "Note", FieldKind::Text).with_constraint(Constraint {
                        max_len: Some(500),
                        ..Default::default()
                    }),
                )
                .with_check(CrossFieldRule::new(
                    "manual corrections need supporting evidence",
                    CrossFieldCheck::RequiredWhen {
                        field: "kind".into(),
                        equals: FieldValue::select("manual"),
                        then_required: vec!["evidence".into()],
                    },
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_spec::validate_step;

    fn time(hhmm: &str) -> FieldValue {
        FieldValue::Time(NaiveTime::parse_from_str(hhmm, "%H:%M").expect("valid time"))
    }

    #[test]
    fn declaration_is_valid() {
        attendance_wizard().ensure_valid().expect("valid wizard");
    }

    #[test]
    fn overnight_checkout_is_rejected() {
        let spec = attendance_wizard();
        let step = spec.step(1).expect("times step");
        let draft = Draft::new()
            .with(
                "work_date",
                FieldValue::Date(
                    NaiveDate::parse_from_str("2026-08-03", "%Y-%m-%d").expect("valid date"),
                ),
            )
            .with("start_time", time("22:00"))
            .with("end_time", time("06:00"));
        let result = validate_step(step, &draft);
        assert_eq!(result.codes_for("end_time"), vec!["after"]);
    }
}
