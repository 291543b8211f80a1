use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use wizard_spec::{Draft, WizardMode};

/// Identifier handed back by the backend once a draft is persisted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure modes of the persistence boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The backend disagreed with the draft; retrying unchanged will not help.
    #[error("submission rejected: {message}")]
    Rejected { message: String },
    /// The backend was unreachable or flaky; the same draft may be retried.
    #[error("submission failed: {message}")]
    Transient { message: String },
}

impl SubmissionError {
    pub fn rejected(message: impl Into<String>) -> Self {
        SubmissionError::Rejected {
            message: message.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        SubmissionError::Transient {
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, SubmissionError::Transient { .. })
    }
}

/// Boundary the controller calls to persist a finished draft.
///
/// Implementations must commit all-or-nothing: a returned error means the
/// draft was not applied at all, so the wizard may retry it unchanged. Any
/// timeout policy belongs behind this trait, not in the controller.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn save(
        &self,
        draft: &Draft,
        mode: WizardMode,
        entity_id: Option<&EntityId>,
    ) -> Result<EntityId, SubmissionError>;
}

#[async_trait]
impl<G: SubmissionGateway + ?Sized> SubmissionGateway for std::sync::Arc<G> {
    async fn save(
        &self,
        draft: &Draft,
        mode: WizardMode,
        entity_id: Option<&EntityId>,
    ) -> Result<EntityId, SubmissionError> {
        (**self).save(draft, mode, entity_id).await
    }
}
