//! Text Refiner Port - the fallible boundary of copy refinement.
//!
//! Implementations talk to an external text-generation service and report
//! every failure as an [`AIError`]. Collapsing failures into "keep the
//! original" is the job of the application layer, not of this port.

use async_trait::async_trait;

use super::ai_provider::AIError;

/// Port for improving proposal text and suggesting scope items.
///
/// # Contract
///
/// Implementations must:
/// - Make at most one remote attempt per call (no retries, no caching)
/// - Return `Err` for blank or malformed responses instead of an empty value
#[async_trait]
pub trait TextRefiner: Send + Sync {
    /// Rewrites `text` to read more professionally, keeping its meaning.
    ///
    /// `context` names the document section the text belongs to.
    async fn refine(&self, text: &str, context: &str) -> Result<String, AIError>;

    /// Suggests scope items for a project, in display order.
    async fn suggest_scope(&self, project_name: &str) -> Result<Vec<String>, AIError>;
}
