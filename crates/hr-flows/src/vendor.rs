use serde::{Deserialize, Serialize};

use wizard_spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, Draft, FieldKind, FieldSpec, FieldValue, FileRef,
    StepSpec, WizardSpec,
};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9][0-9\-\s]{6,18}$";

/// Vendor record as the directory stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub legal_name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub contact_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub tax_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<FileRef>,
}

impl Vendor {
    /// Draft used to pre-populate an edit-mode session. Optional fields the
    /// record does not carry stay absent.
    pub fn seed(&self) -> Draft {
        let mut draft = Draft::new()
            .with("legal_name", FieldValue::text(self.legal_name.as_str()))
            .with("category", FieldValue::select(self.category.as_str()))
            .with("contact_name", FieldValue::text(self.contact_name.as_str()))
            .with("email", FieldValue::text(self.email.as_str()))
            .with("tax_id", FieldValue::text(self.tax_id.as_str()));
        if let Some(website) = &self.website {
            draft.insert("website", FieldValue::text(website.as_str()));
        }
        if let Some(phone) = &self.phone {
            draft.insert("phone", FieldValue::text(phone.as_str()));
        }
        if !self.documents.is_empty() {
            draft.insert("documents", FieldValue::Files(self.documents.clone()));
        }
        draft
    }
}

/// Three-step vendor onboarding: profile, contact, compliance.
pub fn vendor_wizard() -> WizardSpec {
    WizardSpec::new("vendor-onboarding", "Vendor Onboarding", "1.2.0")
        .with_step(
            StepSpec::new("profile", "Company Profile")
                .with_field(
                    FieldSpec::new("legal_name", "Legal name", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            min_len: Some(2),
                            max_len: Some(120),
                            ..Default::default()
                        }),
                )
                .with_field(FieldSpec::select(
                    "category",
                    "Service category",
                    vec![
                        "staffing".into(),
                        "payroll".into(),
                        "training".into(),
                        "benefits".into(),
                    ],
                ))
                .with_field(
                    FieldSpec::new("website", "Website", FieldKind::Text).with_constraint(
                        Constraint {
                            pattern: Some(r"^https?://\S+$".into()),
                            ..Default::default()
                        },
                    ),
                ),
        )
        .with_step(
            StepSpec::new("contact", "Primary Contact")
                .with_field(
                    FieldSpec::new("contact_name", "Contact name", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            min_len: Some(2),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("email", "Email", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            pattern: Some(EMAIL_PATTERN.into()),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("phone", "Phone", FieldKind::Text).with_constraint(Constraint {
                        pattern: Some(PHONE_PATTERN.into()),
                        ..Default::default()
                    }),
                ),
        )
        .with_step(
            StepSpec::new("compliance", "Compliance")
                .with_field(
                    FieldSpec::new("tax_id", "Tax ID", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            pattern: Some(r"^[A-Z0-9\-]{6,20}$".into()),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("documents", "Compliance documents", FieldKind::Files)
                        .required()
                        .with_constraint(Constraint {
                            min_items: Some(1),
                            max_items: Some(5),
                            max_file_bytes: Some(5 * 1024 * 1024),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("notes", "Notes", FieldKind::Text).with_constraint(Constraint {
                        max_len: Some(500),
                        ..Default::default()
                    }),
                )
                .with_check(CrossFieldRule::new(
                    "a tax id must come with its supporting documents",
                    CrossFieldCheck::RequiredWhen {
                        field: "category".into(),
                        equals: FieldValue::select("payroll"),
                        then_required: vec!["documents".into()],
                    },
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_spec::validate_step;

    #[test]
    fn declaration_is_valid() {
        vendor_wizard().ensure_valid().expect("valid wizard");
    }

    #[test]
    fn seed_skips_absent_optional_fields() {
        let vendor = Vendor {
            legal_name: "Acme Staffing".into(),
            category: "staffing".into(),
            website: None,
            contact_name: "Dewi".into(),
            email: "dewi@acme.example".into(),
            phone: None,
            tax_id: "TAX-001122".into(),
            documents: vec![],
        };
        let seed = vendor.seed();
        assert!(!seed.contains("website"));
        assert!(!seed.contains("phone"));
        assert_eq!(seed.get("legal_name"), Some(&FieldValue::text("Acme Staffing")));
    }

    #[test]
    fn oversized_documents_are_rejected() {
        let spec = vendor_wizard();
        let step = spec.step(2).expect("compliance step");
        let draft = Draft::new()
            .with("tax_id", FieldValue::text("TAX-001122"))
            .with(
                "documents",
                FieldValue::Files(vec![FileRef::new("huge.pdf", 50 * 1024 * 1024)]),
            );
        let result = validate_step(step, &draft);
        assert_eq!(result.codes_for("documents"), vec!["file_too_large"]);
    }
}
