use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use wizard_spec::{Draft, WizardMode};

use crate::gateway::{EntityId, SubmissionError, SubmissionGateway};

/// Gateway backed by a process-local map. Stands in for the real backend in
/// tests and demo flows; commits are all-or-nothing by construction.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    entities: Mutex<BTreeMap<EntityId, Draft>>,
    next_id: AtomicU64,
    fail_next: Mutex<Option<SubmissionError>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load an entity, e.g. the record an edit-mode wizard amends.
    pub fn insert_entity(&self, id: EntityId, draft: Draft) {
        lock(&self.entities).insert(id, draft);
    }

    pub fn entity(&self, id: &EntityId) -> Option<Draft> {
        lock(&self.entities).get(id).cloned()
    }

    pub fn entity_count(&self) -> usize {
        lock(&self.entities).len()
    }

    /// Make the next `save` fail once with the given error.
    pub fn fail_next(&self, error: SubmissionError) {
        *lock(&self.fail_next) = Some(error);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl SubmissionGateway for InMemoryGateway {
    async fn save(
        &self,
        draft: &Draft,
        mode: WizardMode,
        entity_id: Option<&EntityId>,
    ) -> Result<EntityId, SubmissionError> {
        if let Some(error) = lock(&self.fail_next).take() {
            return Err(error);
        }

        match mode {
            WizardMode::Create => {
                let id = EntityId::new(format!(
                    "ent-{}",
                    self.next_id.fetch_add(1, Ordering::Relaxed) + 1
                ));
                lock(&self.entities).insert(id.clone(), draft.clone());
                Ok(id)
            }
            WizardMode::Edit => {
                let id = entity_id
                    .cloned()
                    .ok_or_else(|| SubmissionError::rejected("edit requires an entity id"))?;
                let mut entities = lock(&self.entities);
                if !entities.contains_key(&id) {
                    return Err(SubmissionError::rejected(format!(
                        "entity '{}' does not exist",
                        id
                    )));
                }
                entities.insert(id.clone(), draft.clone());
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_spec::FieldValue;

    #[tokio::test]
    async fn create_allocates_fresh_ids() {
        let gateway = InMemoryGateway::new();
        let draft = Draft::new().with("name", FieldValue::text("Alice"));

        let first = gateway
            .save(&draft, WizardMode::Create, None)
            .await
            .expect("create");
        let second = gateway
            .save(&draft, WizardMode::Create, None)
            .await
            .expect("create");

        assert_ne!(first, second);
        assert_eq!(gateway.entity_count(), 2);
    }

    #[tokio::test]
    async fn edit_requires_an_existing_entity() {
        let gateway = InMemoryGateway::new();
        let draft = Draft::new().with("name", FieldValue::text("Alice"));
        let missing = EntityId::new("ent-404");

        let error = gateway
            .save(&draft, WizardMode::Edit, Some(&missing))
            .await
            .expect_err("must reject");
        assert!(!error.is_transient());
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let gateway = InMemoryGateway::new();
        gateway.fail_next(SubmissionError::transient("backend down"));
        let draft = Draft::new().with("name", FieldValue::text("Alice"));

        assert!(gateway.save(&draft, WizardMode::Create, None).await.is_err());
        assert!(gateway.save(&draft, WizardMode::Create, None).await.is_ok());
    }
}
