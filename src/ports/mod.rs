//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the proposal domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - LLM completion backend
//! - `TextRefiner` - Fallible copy refinement and scope suggestion
//! - `DraftStorage` - Persistence of the working record and theme
//! - `DocumentExportService` - Markdown / HTML / PDF serialization

mod ai_provider;
mod document_export_service;
mod draft_storage;
mod text_refiner;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ResponseFormat,
};
pub use document_export_service::{
    DocumentExportService, ExportError, ExportFormat, ExportedDocument,
};
pub use draft_storage::{DraftStorage, DraftStorageError};
pub use text_refiner::TextRefiner;
