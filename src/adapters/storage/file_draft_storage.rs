//! File-based Draft Storage Adapter
//!
//! Stores the working proposal as `draft.json` and the theme preference as a
//! plain-text `theme` file inside a single data directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::proposal::{ProposalRecord, Theme};
use crate::ports::{DraftStorage, DraftStorageError};

const DRAFT_FILE: &str = "draft.json";
const THEME_FILE: &str = "theme";

/// File-based storage for the session draft
#[derive(Debug, Clone)]
pub struct FileDraftStorage {
    base_path: PathBuf,
}

impl FileDraftStorage {
    /// Create a new file storage rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileDraftStorage::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn draft_path(&self) -> PathBuf {
        self.base_path.join(DRAFT_FILE)
    }

    fn theme_path(&self) -> PathBuf {
        self.base_path.join(THEME_FILE)
    }

    /// Ensure the data directory exists
    async fn ensure_dir(&self) -> Result<(), DraftStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DraftStorageError::IoError(e.to_string()))
    }

    /// Read a file, mapping a missing file to `NotFound`
    async fn read(path: &Path) -> Result<String, DraftStorageError> {
        fs::read_to_string(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DraftStorageError::NotFound,
            _ => DraftStorageError::IoError(e.to_string()),
        })
    }
}

#[async_trait]
impl DraftStorage for FileDraftStorage {
    async fn save_draft(&self, record: &ProposalRecord) -> Result<(), DraftStorageError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| DraftStorageError::SerializationFailed(e.to_string()))?;

        fs::write(self.draft_path(), json)
            .await
            .map_err(|e| DraftStorageError::IoError(e.to_string()))?;

        tracing::trace!(path = %self.draft_path().display(), "draft saved");
        Ok(())
    }

    async fn load_draft(&self) -> Result<ProposalRecord, DraftStorageError> {
        let json = Self::read(&self.draft_path()).await?;

        serde_json::from_str(&json)
            .map_err(|e| DraftStorageError::DeserializationFailed(e.to_string()))
    }

    async fn clear_draft(&self) -> Result<(), DraftStorageError> {
        match fs::remove_file(self.draft_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DraftStorageError::IoError(e.to_string())),
        }
    }

    async fn save_theme(&self, theme: Theme) -> Result<(), DraftStorageError> {
        self.ensure_dir().await?;

        fs::write(self.theme_path(), theme.as_str())
            .await
            .map_err(|e| DraftStorageError::IoError(e.to_string()))
    }

    async fn load_theme(&self) -> Result<Theme, DraftStorageError> {
        let raw = Self::read(&self.theme_path()).await?;

        raw.parse()
            .map_err(|e: crate::domain::proposal::UnknownTheme| {
                DraftStorageError::DeserializationFailed(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::proposal::TextField;
    use tempfile::TempDir;

    fn setup() -> (FileDraftStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileDraftStorage::new(temp_dir.path().join("motionflow"));
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_load_draft() {
        let (storage, _temp) = setup();
        let record = ProposalRecord::seed("10/03/2025").with_text(TextField::ClientName, "Acme");

        storage.save_draft(&record).await.unwrap();
        let loaded = storage.load_draft().await.unwrap();

        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_draft_is_camel_case_json() {
        let (storage, temp) = setup();
        storage
            .save_draft(&ProposalRecord::seed("10/03/2025"))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(temp.path().join("motionflow").join(DRAFT_FILE)).unwrap();
        assert!(raw.contains("\"clientName\""));
        assert!(raw.contains("\"notIncluded\""));
    }

    #[tokio::test]
    async fn test_load_missing_draft_is_not_found() {
        let (storage, _temp) = setup();

        let result = storage.load_draft().await;

        assert!(matches!(result, Err(DraftStorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_load_corrupt_draft_fails_deserialization() {
        let (storage, temp) = setup();
        let dir = temp.path().join("motionflow");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(DRAFT_FILE), "{not json").unwrap();

        let result = storage.load_draft().await;

        assert!(matches!(result, Err(DraftStorageError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn test_clear_draft_is_idempotent() {
        let (storage, _temp) = setup();
        storage
            .save_draft(&ProposalRecord::seed("10/03/2025"))
            .await
            .unwrap();

        storage.clear_draft().await.unwrap();
        storage.clear_draft().await.unwrap();

        assert!(matches!(storage.load_draft().await, Err(DraftStorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_theme_round_trip() {
        let (storage, _temp) = setup();

        storage.save_theme(Theme::Dark).await.unwrap();

        assert_eq!(storage.load_theme().await.unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_unknown_theme_fails_deserialization() {
        let (storage, temp) = setup();
        let dir = temp.path().join("motionflow");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(THEME_FILE), "sepia").unwrap();

        assert!(matches!(
            storage.load_theme().await,
            Err(DraftStorageError::DeserializationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_draft_keeps_theme() {
        let (storage, _temp) = setup();
        storage.save_theme(Theme::Dark).await.unwrap();
        storage
            .save_draft(&ProposalRecord::seed("10/03/2025"))
            .await
            .unwrap();

        storage.clear_draft().await.unwrap();

        assert_eq!(storage.load_theme().await.unwrap(), Theme::Dark);
    }
}
