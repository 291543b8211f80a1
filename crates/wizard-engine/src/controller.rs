use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use wizard_spec::{
    Draft, ReviewPayload, SpecError, ValidationResult, WizardMode, WizardSpec,
    build_review_payload, validate_all,
};

use crate::action::{ActionOutcome, WizardAction};
use crate::gateway::{EntityId, SubmissionError, SubmissionGateway};
use crate::reducer::reduce;
use crate::session::{SessionStatus, WizardSession};

/// Why a submission did not produce an entity id.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another submission is awaiting the gateway; at most one may be in
    /// flight per session.
    #[error("a submission is already in flight")]
    InFlight,
    /// The session already ended in `Submitted` or `Cancelled`.
    #[error("wizard session is closed")]
    Closed,
    /// Defensive whole-draft re-validation failed; the draft is untouched.
    #[error("draft failed validation")]
    Invalid(ValidationResult),
    /// The gateway refused or could not be reached; the draft is retained
    /// so the caller may retry.
    #[error(transparent)]
    Gateway(#[from] SubmissionError),
}

/// Orchestrates one wizard session: action dispatch through the pure
/// reducer, and the single suspension point, submission.
pub struct WizardController<G> {
    spec: WizardSpec,
    session: Mutex<WizardSession>,
    in_flight: AtomicBool,
    gateway: G,
}

impl<G: SubmissionGateway> WizardController<G> {
    /// Session for a brand-new entity.
    pub fn create(spec: WizardSpec, gateway: G) -> Result<Self, SpecError> {
        spec.ensure_valid()?;
        let session = WizardSession::start(&spec, WizardMode::Create, None, None);
        Ok(Self::assemble(spec, session, gateway))
    }

    /// Session amending an existing entity; only declared keys are copied
    /// from the seed.
    pub fn edit(
        spec: WizardSpec,
        gateway: G,
        entity_id: EntityId,
        seed: &Draft,
    ) -> Result<Self, SpecError> {
        spec.ensure_valid()?;
        let session = WizardSession::start(&spec, WizardMode::Edit, Some(seed), Some(entity_id));
        Ok(Self::assemble(spec, session, gateway))
    }

    /// Session restored from a persisted draft snapshot.
    pub fn resume(
        spec: WizardSpec,
        gateway: G,
        mode: WizardMode,
        snapshot: Draft,
        step_index: usize,
        entity_id: Option<EntityId>,
    ) -> Result<Self, SpecError> {
        spec.ensure_valid()?;
        let session = WizardSession::resume(&spec, mode, snapshot, step_index, entity_id);
        Ok(Self::assemble(spec, session, gateway))
    }

    fn assemble(spec: WizardSpec, session: WizardSession, gateway: G) -> Self {
        Self {
            spec,
            session: Mutex::new(session),
            in_flight: AtomicBool::new(false),
            gateway,
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, WizardSession> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run one action through the reducer and commit the resulting session.
    pub fn dispatch(&self, action: WizardAction) -> ActionOutcome {
        let mut session = self.lock_session();
        let (next, outcome) = reduce(&self.spec, &session, action);
        *session = next;
        debug!(
            wizard = %self.spec.id,
            step = session.step_index,
            outcome = outcome.label(),
            "action applied"
        );
        outcome
    }

    /// Persist the finished draft through the gateway.
    ///
    /// Every step is re-validated first: edits made on a later step can
    /// invalidate an earlier one, and such a draft must not reach the
    /// backend. On success the draft is cleared; on failure it is retained
    /// unchanged for a deliberate retry. Re-entrant calls while one
    /// submission awaits the gateway are refused without side effects.
    #[instrument(skip(self), fields(wizard = %self.spec.id))]
    pub async fn submit(&self) -> Result<EntityId, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        let result = self.run_submit().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_submit(&self) -> Result<EntityId, SubmitError> {
        let (draft, mode, entity_id) = {
            let mut session = self.lock_session();
            if session.is_terminal() {
                return Err(SubmitError::Closed);
            }
            let effective = session.effective_draft();
            let result = validate_all(&self.spec, &effective);
            if !result.valid {
                debug!(
                    wizard = %self.spec.id,
                    errors = result.errors.len(),
                    missing = result.missing_required.len(),
                    "submission blocked by validation"
                );
                return Err(SubmitError::Invalid(result));
            }
            session.draft = effective;
            session.pending = Draft::new();
            session.status = SessionStatus::Submitting;
            (
                session.draft.clone(),
                session.mode,
                session.entity_id.clone(),
            )
        };

        match self.gateway.save(&draft, mode, entity_id.as_ref()).await {
            Ok(id) => {
                let mut session = self.lock_session();
                session.draft.clear();
                session.pending = Draft::new();
                session.entity_id = Some(id.clone());
                session.status = SessionStatus::Submitted;
                info!(wizard = %self.spec.id, entity = %id, "draft submitted");
                Ok(id)
            }
            Err(error) => {
                let mut session = self.lock_session();
                session.status = SessionStatus::InProgress;
                warn!(
                    wizard = %self.spec.id,
                    transient = error.is_transient(),
                    %error,
                    "submission failed; draft retained"
                );
                Err(error.into())
            }
        }
    }

    pub fn spec(&self) -> &WizardSpec {
        &self.spec
    }

    pub fn status(&self) -> SessionStatus {
        self.lock_session().status
    }

    pub fn step_index(&self) -> usize {
        self.lock_session().step_index
    }

    pub fn mode(&self) -> WizardMode {
        self.lock_session().mode
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.lock_session().entity_id.clone()
    }

    /// Committed draft, without the active step's pending edits.
    pub fn draft(&self) -> Draft {
        self.lock_session().draft.clone()
    }

    /// Draft as the user currently sees it; also the snapshot to persist
    /// when suspending a session.
    pub fn effective_draft(&self) -> Draft {
        self.lock_session().effective_draft()
    }

    /// Payload for the review-before-submit screen.
    pub fn review(&self) -> ReviewPayload {
        build_review_payload(&self.spec, &self.lock_session().effective_draft())
    }
}
