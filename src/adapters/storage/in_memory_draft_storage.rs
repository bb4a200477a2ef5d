//! In-Memory Draft Storage Adapter
//!
//! Keeps the serialized draft and theme in memory. Values are held in their
//! stored string form so corrupt state can be simulated in tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::proposal::{ProposalRecord, Theme};
use crate::ports::{DraftStorage, DraftStorageError};

/// In-memory storage for the session draft
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftStorage {
    draft: Arc<RwLock<Option<String>>>,
    theme: Arc<RwLock<Option<String>>>,
}

impl InMemoryDraftStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage whose draft slot already holds `raw`
    pub fn with_raw_draft(raw: impl Into<String>) -> Self {
        Self {
            draft: Arc::new(RwLock::new(Some(raw.into()))),
            theme: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a storage whose theme slot already holds `raw`
    pub fn with_raw_theme(self, raw: impl Into<String>) -> Self {
        Self {
            draft: self.draft,
            theme: Arc::new(RwLock::new(Some(raw.into()))),
        }
    }

    /// The stored draft, exactly as persisted
    pub async fn raw_draft(&self) -> Option<String> {
        self.draft.read().await.clone()
    }

    /// Whether a draft is currently stored
    pub async fn has_draft(&self) -> bool {
        self.draft.read().await.is_some()
    }
}

#[async_trait]
impl DraftStorage for InMemoryDraftStorage {
    async fn save_draft(&self, record: &ProposalRecord) -> Result<(), DraftStorageError> {
        let json = serde_json::to_string(record)
            .map_err(|e| DraftStorageError::SerializationFailed(e.to_string()))?;
        *self.draft.write().await = Some(json);
        Ok(())
    }

    async fn load_draft(&self) -> Result<ProposalRecord, DraftStorageError> {
        let draft = self.draft.read().await;
        let json = draft.as_deref().ok_or(DraftStorageError::NotFound)?;
        serde_json::from_str(json)
            .map_err(|e| DraftStorageError::DeserializationFailed(e.to_string()))
    }

    async fn clear_draft(&self) -> Result<(), DraftStorageError> {
        *self.draft.write().await = None;
        Ok(())
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), DraftStorageError> {
        *self.theme.write().await = Some(theme.as_str().to_string());
        Ok(())
    }

    async fn load_theme(&self) -> Result<Theme, DraftStorageError> {
        let theme = self.theme.read().await;
        let raw = theme.as_deref().ok_or(DraftStorageError::NotFound)?;
        raw.parse()
            .map_err(|e: crate::domain::proposal::UnknownTheme| {
                DraftStorageError::DeserializationFailed(e.to_string())
            })
    }
}
