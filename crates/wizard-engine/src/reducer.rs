use wizard_spec::{Draft, WizardSpec, validate_step};

use crate::action::{ActionOutcome, WizardAction};
use crate::session::{SessionStatus, WizardSession};

/// Pure transition function: no I/O, no clock, no logging. Given the wizard
/// definition, the current session, and one action, produce the next session
/// and what happened. Submission is not an action; it suspends and lives on
/// the controller.
pub fn reduce(
    spec: &WizardSpec,
    session: &WizardSession,
    action: WizardAction,
) -> (WizardSession, ActionOutcome) {
    if !session.is_active() {
        return (session.clone(), ActionOutcome::Ignored);
    }

    match action {
        WizardAction::FieldChanged { key, value } => {
            let mut next = session.clone();
            next.pending.insert(key, value);
            (next, ActionOutcome::Updated)
        }
        WizardAction::FieldCleared { key } => {
            let mut next = session.clone();
            next.pending.remove(&key);
            next.draft.remove(&key);
            (next, ActionOutcome::Updated)
        }
        WizardAction::Next => {
            let Some(step) = spec.step(session.step_index) else {
                return (session.clone(), ActionOutcome::Ignored);
            };
            let effective = session.effective_draft();
            let result = validate_step(step, &effective);
            if !result.valid {
                return (session.clone(), ActionOutcome::Rejected(result));
            }
            let mut next = session.clone();
            next.draft = effective;
            next.pending = Draft::new();
            // Clamped at the last step; the final screen submits instead.
            if next.step_index + 1 < spec.step_count() {
                next.step_index += 1;
            }
            let to = next.step_index;
            (next, ActionOutcome::Advanced { to })
        }
        WizardAction::Back => {
            let mut next = session.clone();
            // Unvalidated edits are retained, not rolled back.
            next.draft = next.effective_draft();
            next.pending = Draft::new();
            next.step_index = next.step_index.saturating_sub(1);
            let to = next.step_index;
            (next, ActionOutcome::MovedBack { to })
        }
        WizardAction::JumpTo(index) => {
            if index > session.step_index {
                return (session.clone(), ActionOutcome::JumpRefused { requested: index });
            }
            let mut next = session.clone();
            next.draft = next.effective_draft();
            next.pending = Draft::new();
            next.step_index = index;
            (next, ActionOutcome::Jumped { to: index })
        }
        WizardAction::Cancel => {
            if session.is_dirty() && spec.policy.confirm_discard {
                return (session.clone(), ActionOutcome::CancelNeedsConfirm);
            }
            let mut next = session.clone();
            next.status = SessionStatus::Cancelled;
            (next, ActionOutcome::Cancelled)
        }
        WizardAction::ConfirmCancel => {
            let mut next = session.clone();
            next.status = SessionStatus::Cancelled;
            (next, ActionOutcome::Cancelled)
        }
    }
}
