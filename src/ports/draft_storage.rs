//! Draft Storage Port - Interface for persisting the working proposal.
//!
//! Two independent keys are stored: the JSON-serialized record and the
//! light/dark theme preference.

use async_trait::async_trait;

use crate::domain::proposal::{ProposalRecord, Theme};

/// Errors that can occur during draft storage operations
#[derive(Debug, thiserror::Error)]
pub enum DraftStorageError {
    #[error("No saved draft")]
    NotFound,

    #[error("Failed to serialize draft: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize draft: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for saving and restoring the session's proposal and preferences
#[async_trait]
pub trait DraftStorage: Send + Sync {
    /// Save the current record, replacing any previous draft
    async fn save_draft(&self, record: &ProposalRecord) -> Result<(), DraftStorageError>;

    /// Load the saved record
    ///
    /// # Errors
    /// Returns `DraftStorageError::NotFound` if nothing was saved, and
    /// `DeserializationFailed` if the stored value is corrupt
    async fn load_draft(&self) -> Result<ProposalRecord, DraftStorageError>;

    /// Remove the saved record; succeeds when none exists
    async fn clear_draft(&self) -> Result<(), DraftStorageError>;

    /// Save the theme preference
    async fn save_theme(&self, theme: Theme) -> Result<(), DraftStorageError>;

    /// Load the theme preference
    ///
    /// # Errors
    /// Returns `DraftStorageError::NotFound` if no preference was saved
    async fn load_theme(&self) -> Result<Theme, DraftStorageError>;
}
