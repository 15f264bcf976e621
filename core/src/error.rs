use thiserror::Error;

use crate::types::RecordId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    #[error("{entity} {id} not found")]
    NotFound {
        entity: &'static str,
        id: RecordId,
    },

    #[error("no borrower holds tax id {tax_id}")]
    UnknownRecipient { tax_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Validation failures and failed lookups abort one operation and
    /// return control to the caller's prompt; everything else is a
    /// storage-layer fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::UnknownRecipient { .. }
        )
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
