use serde::{Deserialize, Serialize};

use wizard_spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, Draft, FieldKind, FieldSpec, FieldValue, StepSpec,
    WizardSpec,
};

/// Offer-letter template record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferTemplate {
    pub title: String,
    pub body: String,
    pub locale: String,
    /// Salary band bounds in minor units.
    pub salary_min: i64,
    pub salary_max: i64,
    pub currency: String,
    pub negotiable: bool,
}

impl OfferTemplate {
    pub fn seed(&self) -> Draft {
        Draft::new()
            .with("title", FieldValue::text(self.title.as_str()))
            .with("body", FieldValue::text(self.body.as_str()))
            .with("locale", FieldValue::select(self.locale.as_str()))
            .with(
                "salary_min",
                FieldValue::currency(self.salary_min, self.currency.as_str()),
            )
            .with(
                "salary_max",
                FieldValue::currency(self.salary_max, self.currency.as_str()),
            )
            .with("negotiable", FieldValue::Flag(self.negotiable))
    }
}

/// Two-step offer-letter template editor: template text, compensation band.
pub fn offer_template_wizard() -> WizardSpec {
    WizardSpec::new("offer-template", "Offer Letter Template", "1.3.0")
        .with_step(
            StepSpec::new("template", "Template")
                .with_field(
                    FieldSpec::new("title", "Title", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            min_len: Some(4),
                            max_len: Some(120),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("body", "Body", FieldKind::Text)
                        .required()
                        .with_constraint(Constraint {
                            min_len: Some(50),
                            max_len: Some(5000),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::select("locale", "Locale", vec!["en".into(), "id".into()])
                        .with_default(FieldValue::select("en")),
                ),
        )
        .with_step(
            StepSpec::new("compensation", "Compensation")
                .with_field(
                    FieldSpec::new("salary_min", "Band minimum", FieldKind::Currency)
                        .required()
                        .with_constraint(Constraint {
                            min: Some(0.0),
                            ..Default::default()
                        }),
                )
                .with_field(
                    FieldSpec::new("salary_max", "Band maximum", FieldKind::Currency).required(),
                )
                .with_field(FieldSpec::new("negotiable", "Negotiable", FieldKind::Flag))
                .with_check(CrossFieldRule::new(
                    "band maximum cannot sit below the minimum",
                    CrossFieldCheck::AtLeast {
                        smaller: "salary_min".into(),
                        larger: "salary_max".into(),
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
        offer_template_wizard().ensure_valid().expect("valid wizard");
    }

    #[test]
    fn inverted_band_fails_on_the_maximum() {
        let spec = offer_template_wizard();
        let step = spec.step(1).expect("compensation step");
        let draft = Draft::new()
            .with("salary_min", FieldValue::currency(900_000, "USD"))
            .with("salary_max", FieldValue::currency(500_000, "USD"));
        let result = validate_step(step, &draft);
        assert_eq!(result.codes_for("salary_max"), vec!["at_least"]);
    }

    #[test]
    fn equal_band_bounds_are_allowed() {
        let spec = offer_template_wizard();
        let step = spec.step(1).expect("compensation step");
        let draft = Draft::new()
            .with("salary_min", FieldValue::currency(500_000, "USD"))
            .with("salary_max", FieldValue::currency(500_000, "USD"));
        assert!(validate_step(step, &draft).valid);
    }
}
