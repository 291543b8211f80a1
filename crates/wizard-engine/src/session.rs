use wizard_spec::{Draft, WizardMode, WizardSpec};

use crate::gateway::EntityId;

/// Lifecycle of one wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Accepting edits and navigation.
    InProgress,
    /// A submission is awaiting the gateway; actions are ignored.
    Submitting,
    /// Terminal: the draft was persisted and cleared.
    Submitted,
    /// Terminal: the draft was discarded.
    Cancelled,
}

/// Mutable state of one running wizard: step position, the accumulated
/// draft, and the step-local edits not yet merged into it.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    pub step_index: usize,
    pub draft: Draft,
    /// Edits on the active step, merged into `draft` on a validated advance.
    pub pending: Draft,
    /// Snapshot taken at start, used for the cancel dirty check.
    pub initial: Draft,
    pub mode: WizardMode,
    pub entity_id: Option<EntityId>,
    pub status: SessionStatus,
}

impl WizardSession {
    /// Session at step 0 with a freshly initialised draft.
    pub fn start(
        spec: &WizardSpec,
        mode: WizardMode,
        seed: Option<&Draft>,
        entity_id: Option<EntityId>,
    ) -> Self {
        let draft = Draft::init(spec, mode, seed);
        Self {
            step_index: 0,
            initial: draft.clone(),
            pending: Draft::new(),
            draft,
            mode,
            entity_id,
            status: SessionStatus::InProgress,
        }
    }

    /// Session restored from a persisted draft snapshot. Unknown keys are
    /// dropped and the step index clamped to the wizard's range.
    pub fn resume(
        spec: &WizardSpec,
        mode: WizardMode,
        mut snapshot: Draft,
        step_index: usize,
        entity_id: Option<EntityId>,
    ) -> Self {
        snapshot.retain_declared(spec);
        Self {
            step_index: step_index.min(spec.last_step()),
            initial: snapshot.clone(),
            pending: Draft::new(),
            draft: snapshot,
            mode,
            entity_id,
            status: SessionStatus::InProgress,
        }
    }

    /// The draft as the user currently sees it: committed state plus the
    /// active step's pending edits.
    pub fn effective_draft(&self) -> Draft {
        self.draft.merged(&self.pending)
    }

    pub fn is_dirty(&self) -> bool {
        self.effective_draft() != self.initial
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, SessionStatus::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, SessionStatus::Submitted | SessionStatus::Cancelled)
    }
}
