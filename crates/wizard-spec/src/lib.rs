#![allow(missing_docs)]

pub mod draft;
pub mod review;
pub mod spec;
pub mod validate;

pub use draft::{Draft, WizardMode};
pub use review::{
    ReviewField, ReviewPayload, ReviewProgress, ReviewStep, build_review_payload, render_json,
    render_text,
};
pub use spec::{
    Constraint, CrossFieldCheck, CrossFieldRule, FieldKind, FieldSpec, FieldValue, FileRef,
    SpecError, StepSpec, WizardPolicy, WizardSpec,
};
pub use validate::{ValidationError, ValidationResult, validate_all, validate_step};
