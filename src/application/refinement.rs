//! RefinementService - infallible front for the TextRefiner port.
//!
//! Every failure of the underlying refiner, including a missing one, is
//! logged and replaced by the caller's original value. Nothing here
//! retries, caches or rate-limits.

use std::sync::Arc;

use crate::ports::TextRefiner;

/// Refines proposal copy, falling back to the input on any failure.
#[derive(Clone)]
pub struct RefinementService {
    refiner: Option<Arc<dyn TextRefiner>>,
}

impl RefinementService {
    pub fn new(refiner: Arc<dyn TextRefiner>) -> Self {
        Self {
            refiner: Some(refiner),
        }
    }

    /// A service with no refiner; every call returns its input.
    pub fn unconfigured() -> Self {
        Self { refiner: None }
    }

    pub fn is_configured(&self) -> bool {
        self.refiner.is_some()
    }

    /// Returns the refined text, or `text` unchanged if refinement fails.
    pub async fn refine(&self, text: &str, context: &str) -> String {
        let Some(refiner) = &self.refiner else {
            tracing::warn!(context, "refinement skipped: no provider configured");
            return text.to_string();
        };

        match refiner.refine(text, context).await {
            Ok(refined) => refined,
            Err(e) => {
                tracing::warn!(context, error = %e, "refinement failed; keeping original text");
                text.to_string()
            }
        }
    }

    /// Returns suggested scope items, or an empty list if suggestion fails.
    pub async fn suggest_scope(&self, project_name: &str) -> Vec<String> {
        let Some(refiner) = &self.refiner else {
            tracing::warn!(project_name, "scope suggestion skipped: no provider configured");
            return Vec::new();
        };

        match refiner.suggest_scope(project_name).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(project_name, error = %e, "scope suggestion failed");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for RefinementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinementService")
            .field("configured", &self.is_configured())
            .finish()
    }
}
