//! Storage Adapters
//!
//! Implementations of the DraftStorage port for persisting the working proposal.
//!
//! ## Available Adapters
//!
//! - **FileDraftStorage** - Stores the draft as JSON plus a theme file on disk
//! - **InMemoryDraftStorage** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileDraftStorage, InMemoryDraftStorage};
//!
//! // Production: file-based storage
//! let storage = FileDraftStorage::new("./data");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryDraftStorage::new();
//! ```

mod file_draft_storage;
mod in_memory_draft_storage;

pub use file_draft_storage::FileDraftStorage;
pub use in_memory_draft_storage::InMemoryDraftStorage;
