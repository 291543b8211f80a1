pub mod field;
pub mod step;
pub mod wizard;

pub use field::{Constraint, FieldKind, FieldSpec, FieldValue, FileRef};
pub use step::{CrossFieldCheck, CrossFieldRule, StepSpec};
pub use wizard::{SpecError, WizardPolicy, WizardSpec};
