use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::model::ids::TrainerId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrainerError {
    #[error("trainer email must look like an address")]
    InvalidEmail,

    #[error("trainer name cannot be empty")]
    EmptyName,
}

/// The signed-in trainer, as seen by every trainer-scoped query.
///
/// `user_ref` is the opaque subject of the external identity provider; the
/// app never authenticates on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    id: TrainerId,
    user_ref: Uuid,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl Trainer {
    /// Build a trainer, normalizing email and name.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::InvalidEmail` when the email is blank or has no `@`,
    /// and `TrainerError::EmptyName` when the trimmed name is empty.
    pub fn new(
        id: TrainerId,
        user_ref: Uuid,
        email: impl Into<String>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TrainerError> {
        let email = normalize_email(&email.into())?;
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(TrainerError::EmptyName);
        }
        Ok(Self {
            id,
            user_ref,
            email,
            name,
            created_at,
        })
    }

    /// Display name used when the identity carries none: the local part of the email.
    #[must_use]
    pub fn default_name_for(email: &str) -> String {
        let local = email.trim().split('@').next().unwrap_or_default();
        if local.is_empty() {
            "Trainer".to_owned()
        } else {
            local.to_owned()
        }
    }

    #[must_use]
    pub fn id(&self) -> TrainerId {
        self.id
    }

    #[must_use]
    pub fn user_ref(&self) -> Uuid {
        self.user_ref
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Lowercases and trims an email, rejecting obviously malformed input.
///
/// # Errors
///
/// Returns `TrainerError::InvalidEmail` if the value is blank or lacks `@`.
pub fn normalize_email(raw: &str) -> Result<String, TrainerError> {
    let email = raw.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(TrainerError::InvalidEmail),
    }
}
