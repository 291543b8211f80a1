use wizard_spec::{FieldValue, ValidationResult};

/// Messages a UI dispatches at the wizard. The reducer is the only place
/// that interprets them.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// The user edited a field on the active step.
    FieldChanged { key: String, value: FieldValue },
    /// The user cleared a field; the key becomes absent, never empty.
    FieldCleared { key: String },
    /// Advance past the active step, gated by its validation.
    Next,
    /// Return to the previous step; never gated.
    Back,
    /// Jump to an already-visited step (review-screen edit links).
    JumpTo(usize),
    /// Abandon the session, asking first when the draft is dirty.
    Cancel,
    /// Confirmation answer for a dirty cancel.
    ConfirmCancel,
}

/// What one dispatched action did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A pending edit was recorded.
    Updated,
    /// The active step validated; its edits merged and the index moved
    /// (clamped at the last step).
    Advanced { to: usize },
    /// Validation blocked the advance; the index did not change.
    Rejected(ValidationResult),
    MovedBack { to: usize },
    Jumped { to: usize },
    /// Jumping ahead of the current step is refused.
    JumpRefused { requested: usize },
    /// The draft is dirty; cancellation needs an explicit confirmation.
    CancelNeedsConfirm,
    Cancelled,
    /// The session is submitting or already closed; the action was dropped.
    Ignored,
}

impl ActionOutcome {
    /// Stable label used in transition logs.
    pub fn label(&self) -> &'static str {
        match self {
            ActionOutcome::Updated => "updated",
            ActionOutcome::Advanced { .. } => "advanced",
            ActionOutcome::Rejected(_) => "rejected",
            ActionOutcome::MovedBack { .. } => "moved_back",
            ActionOutcome::Jumped { .. } => "jumped",
            ActionOutcome::JumpRefused { .. } => "jump_refused",
            ActionOutcome::CancelNeedsConfirm => "cancel_needs_confirm",
            ActionOutcome::Cancelled => "cancelled",
            ActionOutcome::Ignored => "ignored",
        }
    }
}
