//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the proposal domain to external systems:
//! - `ai` - LLM providers and the text refiner built on them
//! - `document` - Markdown / HTML / PDF export
//! - `storage` - Draft and theme persistence (file, in-memory)

pub mod ai;
pub mod document;
pub mod storage;

pub use ai::{LlmTextRefiner, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use document::PulldownExportService;
pub use storage::{FileDraftStorage, InMemoryDraftStorage};
