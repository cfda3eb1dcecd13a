use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{ClientId, TrainerId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    #[error("Name is required")]
    EmptyName,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw form input for adding or editing a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientDraft {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Trim every field; blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyName` if the trimmed name is empty.
    pub fn validate(self) -> Result<ValidClient, ClientError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }
        Ok(ValidClient {
            name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
        })
    }
}

/// Client fields that passed validation, not yet bound to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    trainer_id: TrainerId,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl Client {
    #[must_use]
    pub fn from_valid(
        id: ClientId,
        trainer_id: TrainerId,
        fields: ValidClient,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            trainer_id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            created_at,
        }
    }

    /// Rehydrate a client from storage.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyName` if the persisted name is blank.
    pub fn from_persisted(
        id: ClientId,
        trainer_id: TrainerId,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ClientError> {
        let fields = ClientDraft {
            name,
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
        }
        .validate()?;
        Ok(Self::from_valid(id, trainer_id, fields, created_at))
    }

    /// Replace the editable fields, keeping identity and creation time.
    #[must_use]
    pub fn with_fields(&self, fields: ValidClient) -> Self {
        Self::from_valid(self.id, self.trainer_id, fields, self.created_at)
    }

    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }

    #[must_use]
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
