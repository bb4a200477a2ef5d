//! ProposalSession - owner of the working proposal.
//!
//! The session holds the single authoritative [`ProposalRecord`]. Every edit
//! replaces the record with a new value and persists it; preview and export
//! both render from that current value, so they cannot diverge.

use std::sync::Arc;

use thiserror::Error;

use crate::application::refinement::RefinementService;
use crate::domain::proposal::{
    render, resolve_style, EditError, ListField, ProposalRecord, RenderedDocument, StyleVariant,
    TextField, Theme,
};
use crate::ports::{
    DocumentExportService, DraftStorage, DraftStorageError, ExportError, ExportFormat,
    ExportedDocument,
};

/// Date format of the seed record's issue date.
pub const ISSUE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Today's date as shown on a new proposal.
pub fn today_issue_date() -> String {
    chrono::Local::now().format(ISSUE_DATE_FORMAT).to_string()
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Field {0} cannot be refined")]
    NotRefinable(TextField),

    /// The in-memory record was updated but could not be saved.
    #[error("Failed to persist draft: {0}")]
    Storage(#[from] DraftStorageError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// The editing session: record, transient style and theme preference.
pub struct ProposalSession {
    record: ProposalRecord,
    style: StyleVariant,
    theme: Theme,
    seed_date: String,
    storage: Arc<dyn DraftStorage>,
    exporter: Arc<dyn DocumentExportService>,
    refinement: RefinementService,
}

impl ProposalSession {
    /// Restores the saved draft and theme, seeding a new record dated today
    /// when nothing usable is stored.
    pub async fn restore(
        storage: Arc<dyn DraftStorage>,
        exporter: Arc<dyn DocumentExportService>,
        refinement: RefinementService,
    ) -> Self {
        Self::restore_with_date(storage, exporter, refinement, today_issue_date()).await
    }

    /// Same as [`ProposalSession::restore`], with an explicit seed date.
    pub async fn restore_with_date(
        storage: Arc<dyn DraftStorage>,
        exporter: Arc<dyn DocumentExportService>,
        refinement: RefinementService,
        seed_date: impl Into<String>,
    ) -> Self {
        let seed_date = seed_date.into();
        let record = load_record(storage.as_ref(), &seed_date).await;
        let theme = load_theme(storage.as_ref()).await;

        Self {
            record,
            style: StyleVariant::default(),
            theme,
            seed_date,
            storage,
            exporter,
            refinement,
        }
    }

    pub fn record(&self) -> &ProposalRecord {
        &self.record
    }

    pub fn style(&self) -> StyleVariant {
        self.style
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Selects the style used by preview and export. Not persisted.
    pub fn set_style(&mut self, style: StyleVariant) {
        self.style = style;
    }

    /// Renders the current record in the current style.
    pub fn preview(&self) -> RenderedDocument {
        render(&self.record, &resolve_style(self.style))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────────────

    pub async fn set_text(
        &mut self,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let next = self.record.with_text(field, value);
        self.replace(next).await
    }

    pub async fn set_list_item(
        &mut self,
        field: ListField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let next = self.record.with_list_item(field, index, value)?;
        self.replace(next).await
    }

    /// Appends an empty row to a list.
    pub async fn add_item(&mut self, field: ListField) -> Result<(), SessionError> {
        let next = self.record.with_item_appended(field);
        self.replace(next).await
    }

    pub async fn remove_item(&mut self, field: ListField, index: usize) -> Result<(), SessionError> {
        let next = self.record.without_item(field, index)?;
        self.replace(next).await
    }

    /// Discards the record and the stored draft, starting over from the seed.
    pub async fn reset(&mut self) -> Result<(), SessionError> {
        self.record = ProposalRecord::seed(self.seed_date.clone());
        self.storage.clear_draft().await?;
        tracing::info!("proposal reset to seed");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────────────

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), SessionError> {
        self.theme = theme;
        self.storage.save_theme(theme).await?;
        Ok(())
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme, SessionError> {
        let next = self.theme.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refinement
    // ─────────────────────────────────────────────────────────────────────

    /// Refines a prose field in place. On any refinement failure the field
    /// keeps its value. Returns the field's value after the call.
    pub async fn refine_field(&mut self, field: TextField) -> Result<String, SessionError> {
        let context = field
            .refinement_context()
            .ok_or(SessionError::NotRefinable(field))?;

        let original = self.record.text(field).to_string();
        let refined = self.refinement.refine(&original, context).await;

        if refined != original {
            let next = self.record.with_text(field, refined.clone());
            self.replace(next).await?;
        }
        Ok(refined)
    }

    /// Asks for scope suggestions for the current project name.
    ///
    /// With `append`, suggestions are added after the existing items;
    /// otherwise they replace them. An empty suggestion leaves the scope
    /// untouched. Returns the number of suggested items.
    pub async fn suggest_scope(&mut self, append: bool) -> Result<usize, SessionError> {
        let project_name = self.record.project_name.clone();
        let items = self.refinement.suggest_scope(&project_name).await;
        if items.is_empty() {
            return Ok(0);
        }

        let count = items.len();
        let next = if append {
            self.record.with_items_appended(ListField::Scope, items)
        } else {
            self.record.with_list(ListField::Scope, items)
        };
        self.replace(next).await?;
        Ok(count)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────

    /// Exports exactly what [`ProposalSession::preview`] returns.
    pub async fn export(&self, format: ExportFormat) -> Result<ExportedDocument, SessionError> {
        let document = self.preview();
        let exported = self
            .exporter
            .export(&document, format, &export_basename(&self.record))
            .await?;

        tracing::info!(
            format = %format,
            filename = %exported.filename,
            bytes = exported.size_bytes(),
            checksum = %exported.checksum,
            "proposal exported"
        );
        Ok(exported)
    }

    async fn replace(&mut self, next: ProposalRecord) -> Result<(), SessionError> {
        self.record = next;
        self.storage.save_draft(&self.record).await?;
        tracing::debug!("draft saved");
        Ok(())
    }
}

impl std::fmt::Debug for ProposalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProposalSession")
            .field("record", &self.record)
            .field("style", &self.style)
            .field("theme", &self.theme)
            .field("refinement", &self.refinement)
            .finish()
    }
}

async fn load_record(storage: &dyn DraftStorage, seed_date: &str) -> ProposalRecord {
    match storage.load_draft().await {
        Ok(record) => {
            tracing::debug!("draft restored");
            record
        }
        Err(DraftStorageError::NotFound) => ProposalRecord::seed(seed_date),
        Err(DraftStorageError::DeserializationFailed(reason)) => {
            tracing::warn!(%reason, "discarding malformed draft");
            if let Err(e) = storage.clear_draft().await {
                tracing::warn!(error = %e, "failed to clear malformed draft");
            }
            ProposalRecord::seed(seed_date)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read draft; starting from seed");
            ProposalRecord::seed(seed_date)
        }
    }
}

async fn load_theme(storage: &dyn DraftStorage) -> Theme {
    match storage.load_theme().await {
        Ok(theme) => theme,
        Err(DraftStorageError::NotFound) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring stored theme");
            Theme::default()
        }
    }
}

/// `proposta`, or `proposta-<project>` when the project has a name.
fn export_basename(record: &ProposalRecord) -> String {
    let slug = record
        .project_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "proposta".to_string()
    } else {
        format!("proposta-{}", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{LlmTextRefiner, MockAIProvider, MockError};
    use crate::adapters::document::PulldownExportService;
    use crate::adapters::storage::InMemoryDraftStorage;
    use crate::domain::proposal::SectionKind;

    const DATE: &str = "19/10/2026";

    async fn session_with(
        storage: InMemoryDraftStorage,
        refinement: RefinementService,
    ) -> ProposalSession {
        ProposalSession::restore_with_date(
            Arc::new(storage),
            Arc::new(PulldownExportService::new()),
            refinement,
            DATE,
        )
        .await
    }

    async fn session(storage: InMemoryDraftStorage) -> ProposalSession {
        session_with(storage, RefinementService::unconfigured()).await
    }

    fn refinement(provider: MockAIProvider) -> RefinementService {
        RefinementService::new(Arc::new(LlmTextRefiner::new(Arc::new(provider))))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Restore
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_storage_seeds_with_date() {
        let session = session(InMemoryDraftStorage::new()).await;

        assert_eq!(session.record(), &ProposalRecord::seed(DATE));
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.style(), StyleVariant::Modern);
    }

    #[tokio::test]
    async fn restores_saved_draft_verbatim() {
        let storage = InMemoryDraftStorage::new();
        let saved = ProposalRecord::seed("01/01/2020").with_text(TextField::ClientName, "Acme");
        storage.save_draft(&saved).await.unwrap();

        let session = session(storage).await;

        assert_eq!(session.record(), &saved);
    }

    #[tokio::test]
    async fn malformed_draft_is_discarded_and_reseeded() {
        let storage = InMemoryDraftStorage::with_raw_draft("{\"clientName\": 42");

        let session = session(storage.clone()).await;

        assert_eq!(session.record(), &ProposalRecord::seed(DATE));
        assert!(!storage.has_draft().await);
    }

    #[tokio::test]
    async fn malformed_theme_falls_back_to_light() {
        let storage = InMemoryDraftStorage::new().with_raw_theme("sepia");

        assert_eq!(session(storage).await.theme(), Theme::Light);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edits
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn every_edit_is_persisted() {
        let storage = InMemoryDraftStorage::new();
        let mut session = session(storage.clone()).await;

        session.set_text(TextField::ClientName, "Acme").await.unwrap();
        session.add_item(ListField::Deliverables).await.unwrap();
        session
            .set_list_item(ListField::Deliverables, 3, "Making of")
            .await
            .unwrap();
        session.remove_item(ListField::Scope, 0).await.unwrap();

        let stored = storage.load_draft().await.unwrap();
        assert_eq!(&stored, session.record());
        assert_eq!(stored.client_name, "Acme");
        assert_eq!(stored.deliverables[3], "Making of");
        assert_eq!(stored.scope.len(), 4);
    }

    #[tokio::test]
    async fn out_of_range_edit_changes_nothing() {
        let storage = InMemoryDraftStorage::new();
        let mut session = session(storage.clone()).await;

        let result = session.remove_item(ListField::NotIncluded, 10).await;

        assert!(matches!(result, Err(SessionError::Edit(_))));
        assert_eq!(session.record(), &ProposalRecord::seed(DATE));
        assert!(!storage.has_draft().await);
    }

    #[tokio::test]
    async fn reset_clears_stored_draft() {
        let storage = InMemoryDraftStorage::new();
        let mut session = session(storage.clone()).await;
        session.set_text(TextField::Objective, "").await.unwrap();

        session.reset().await.unwrap();

        assert_eq!(session.record(), &ProposalRecord::seed(DATE));
        assert!(!storage.has_draft().await);
    }

    #[tokio::test]
    async fn theme_toggle_is_persisted() {
        let storage = InMemoryDraftStorage::new();
        let mut session = session(storage.clone()).await;

        assert_eq!(session.toggle_theme().await.unwrap(), Theme::Dark);

        let restored = session_with(storage, RefinementService::unconfigured()).await;
        assert_eq!(restored.theme(), Theme::Dark);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Refinement
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn refine_field_replaces_value() {
        let storage = InMemoryDraftStorage::new();
        let mut session =
            session_with(storage.clone(), refinement(MockAIProvider::new().with_response("Novo."))).await;

        let value = session.refine_field(TextField::Revisions).await.unwrap();

        assert_eq!(value, "Novo.");
        assert_eq!(session.record().revisions, "Novo.");
        assert_eq!(storage.load_draft().await.unwrap().revisions, "Novo.");
    }

    #[tokio::test]
    async fn refine_failure_leaves_field_unchanged() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let mut session = session_with(InMemoryDraftStorage::new(), refinement(provider)).await;
        let before = session.record().clone();

        let value = session.refine_field(TextField::Objective).await.unwrap();

        assert_eq!(value, before.objective);
        assert_eq!(session.record(), &before);
    }

    #[tokio::test]
    async fn refine_non_prose_field_is_rejected() {
        let mut session = session(InMemoryDraftStorage::new()).await;

        assert!(matches!(
            session.refine_field(TextField::ClientName).await,
            Err(SessionError::NotRefinable(TextField::ClientName))
        ));
    }

    #[tokio::test]
    async fn suggest_scope_replaces_or_appends() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"items":["A","B"]}"#)
            .with_response(r#"{"items":["C"]}"#);
        let mut session = session_with(InMemoryDraftStorage::new(), refinement(provider)).await;

        assert_eq!(session.suggest_scope(false).await.unwrap(), 2);
        assert_eq!(session.record().scope, vec!["A", "B"]);

        assert_eq!(session.suggest_scope(true).await.unwrap(), 1);
        assert_eq!(session.record().scope, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn failed_suggestion_keeps_scope() {
        let mut session = session(InMemoryDraftStorage::new()).await;

        assert_eq!(session.suggest_scope(false).await.unwrap(), 0);
        assert_eq!(session.record().scope, ProposalRecord::seed(DATE).scope);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Preview / export
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn preview_follows_style_and_record() {
        let mut session = session(InMemoryDraftStorage::new()).await;
        session.set_style(StyleVariant::Elegant);
        session
            .set_list_item(ListField::Scope, 0, "Primeiro")
            .await
            .unwrap();

        let doc = session.preview();

        assert_eq!(doc.presentation, resolve_style(StyleVariant::Elegant));
        assert_eq!(doc.section(SectionKind::Scope).unwrap().rows()[0], "Primeiro");
        assert_eq!(doc, session.preview());
    }

    #[tokio::test]
    async fn export_uses_the_preview() {
        let mut session = session(InMemoryDraftStorage::new()).await;
        session
            .set_text(TextField::ProjectName, "Lançamento App")
            .await
            .unwrap();

        let exported = session.export(ExportFormat::Markdown).await.unwrap();

        let expected = PulldownExportService::new().to_markdown(&session.preview());
        assert_eq!(exported.content, expected.into_bytes());
        assert_eq!(exported.filename, "proposta-lançamento-app.md");
    }

    #[test]
    fn export_basename_without_project() {
        assert_eq!(export_basename(&ProposalRecord::seed(DATE)), "proposta");
    }

    #[test]
    fn today_issue_date_is_day_month_year() {
        let date = today_issue_date();
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('/').count(), 2);
    }
}
