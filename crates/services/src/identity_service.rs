use std::sync::Arc;

use storage::repository::{NewTrainerRecord, TrainerRepository};
use tracing::info;
use trainer_core::model::{Trainer, TrainerError, normalize_email};
use uuid::Uuid;

use crate::Clock;
use crate::error::IdentityError;

/// Who is using the app, supplied by the caller instead of looked up from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerIdentity {
    pub email: String,
    pub name: Option<String>,
}

impl TrainerIdentity {
    #[must_use]
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name,
        }
    }
}

/// Maps an explicit identity onto its trainer row.
#[derive(Clone)]
pub struct IdentityService {
    clock: Clock,
    trainers: Arc<dyn TrainerRepository>,
}

impl IdentityService {
    #[must_use]
    pub fn new(clock: Clock, trainers: Arc<dyn TrainerRepository>) -> Self {
        Self { clock, trainers }
    }

    /// Find the trainer for `identity`, creating the row on first use.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Trainer` for a malformed email or blank name.
    /// Returns `IdentityError::Storage` if repository access fails.
    pub async fn resolve(&self, identity: &TrainerIdentity) -> Result<Trainer, IdentityError> {
        let email = normalize_email(&identity.email)?;
        if let Some(existing) = self.trainers.find_trainer_by_email(&email).await? {
            return Ok(existing);
        }

        let name = match identity.name.as_deref().map(str::trim) {
            Some("") => return Err(TrainerError::EmptyName.into()),
            Some(name) => name.to_owned(),
            None => Trainer::default_name_for(&email),
        };

        let trainer = self
            .trainers
            .insert_trainer(NewTrainerRecord {
                user_ref: Uuid::new_v4(),
                email,
                name,
                created_at: self.clock.now(),
            })
            .await?;
        info!(trainer = %trainer.id(), "created trainer on first sign-in");
        Ok(trainer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use trainer_core::time::fixed_clock;

    fn service() -> IdentityService {
        IdentityService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn resolve_creates_then_reuses_trainer() {
        let svc = service();
        let first = svc
            .resolve(&TrainerIdentity::new(" Coach@Gym.com ", None))
            .await
            .unwrap();
        assert_eq!(first.name(), "coach");

        let again = svc
            .resolve(&TrainerIdentity::new("coach@gym.com", Some("Other".into())))
            .await
            .unwrap();
        assert_eq!(again.id(), first.id());
        assert_eq!(again.name(), "coach");
    }

    #[tokio::test]
    async fn resolve_rejects_bad_email() {
        let err = service()
            .resolve(&TrainerIdentity::new("nobody", None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IdentityError::Trainer(TrainerError::InvalidEmail)
        ));
    }
}
