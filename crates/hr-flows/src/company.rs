use serde::{Deserialize, Serialize};

use wizard_spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, Draft, FieldKind, FieldSpec, FieldValue, StepSpec,
    WizardSpec,
};

/// Tenant company record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub industry: String,
    pub registered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    pub hq_country: String,
    pub hq_city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hq_postcode: Option<String>,
}

impl Company {
    pub fn seed(&self) -> Draft {
        let mut draft = Draft::new()
            .with("name", FieldValue::text(self.name.as_str()))
            .with("industry", FieldValue::select(self.industry.as_str()))
            .with("registered", FieldValue::Flag(self.registered))
            .with("hq_country", FieldValue::text(self.hq_country.as_str()))
            .with("hq_city", FieldValue::text(self.hq_city.as_str()));
        if let Some(number) = &self.registration_number {
            draft.insert("registration_number", FieldValue::text(number.as_str()));
        }
        if let Some(postcode) = &self.hq_postcode {
            draft.insert("hq_postcode", FieldValue::text(postcode.as_str()));
        }
        draft
    }
}

/// Two-step company administration: registration, headquarters.
pub fn company_wizard() -> WizardSpec {
    WizardSpec::new("company-admin", "Company", "1.1.0")
        .with_step(
            StepSpec::new("registration", "Registration")
                .with_field(
                    FieldSpec::new("name", "Company name", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            min_len: Some(2),
                            max_len: Some(120),
                            ..Default::default()
                        }),
                )
                .with_field(FieldSpec::select(
                    "industry",
                    "Industry",
                    vec![
                        "technology".into(),
                        "manufacturing".into(),
                        "retail".into(),
                        "services".into(),
                    ],
                ))
                .with_field(
                    FieldSpec::new("registered", "Legally registered", FieldKind::Flag)
                        .required()
                        .with_default(FieldValue::Flag(false)),
                )
                .with_field(
                    FieldSpec::new("registration_number", "Registration number", FieldKind::Text)
                        .with_constraint(Constraint {
                            pattern: Some(r"^[A-Z0-9/\-]{4,30}$".into()),
                            ..Default::default()
                        }),
                )
                .with_check(CrossFieldRule::new(
                    "registered companies must provide a registration number",
                    CrossFieldCheck::RequiredWhen {
                        field: "registered".into(),
                        equals: FieldValue::Flag(true),
                        then_required: vec!["registration_number".into()],
                    },
                )),
        )
        .with_step(
            StepSpec::new("headquarters", "Headquarters")
                .with_field(FieldSpec::new("hq_country", "Country", FieldKind::Text).required())
                .with_field(FieldSpec::new("hq_city", "City", FieldKind::Text).required())
                .with_field(
                    FieldSpec::new("hq_postcode", "Postcode", FieldKind::Text).with_constraint(
                        Constraint {
                            pattern: Some(r"^[A-Za-z0-9 \-]{3,10}$".into()),
                            ..Default::default()
                        },
                    ),
                ),
        )
}
