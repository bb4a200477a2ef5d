//! LLM-backed TextRefiner - Proposal copywriting through an AIProvider.
//!
//! Builds the Portuguese prompts used by the studio, sends exactly one
//! completion per call, and validates the reply. Blank or malformed replies
//! are reported as errors so the caller can keep the original value.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, TextRefiner};

/// Number of scope items requested per suggestion.
const SUGGESTED_SCOPE_ITEMS: usize = 5;

/// TextRefiner that delegates generation to any [`AIProvider`].
pub struct LlmTextRefiner<P: ?Sized + AIProvider> {
    provider: Arc<P>,
}

impl<P: ?Sized + AIProvider> LlmTextRefiner<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    fn refine_prompt(text: &str, context: &str) -> String {
        format!(
            "Você é um redator sênior de propostas comerciais para estúdios de Motion Design.\n\
             Refine o seguinte texto para torná-lo mais profissional, persuasivo e elegante, \
             mantendo o sentido original em português:\n\n\
             Contexto da seção: {context}\n\
             Texto Original: {text}\n\n\
             Retorne apenas o texto refinado sem comentários adicionais."
        )
    }

    fn scope_prompt(project_name: &str) -> String {
        format!(
            "Gere uma lista de {SUGGESTED_SCOPE_ITEMS} itens de escopo técnico para um projeto \
             de Motion Design chamado \"{project_name}\".\n\
             Responda em JSON no formato {{\"items\": [\"...\"]}}."
        )
    }

    /// Extracts scope items from a `{"items": [...]}` reply.
    fn parse_scope(content: &str) -> Result<Vec<String>, AIError> {
        let parsed: ScopeSuggestion = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| AIError::parse(format!("invalid scope suggestion: {}", e)))?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ScopeSuggestion {
    items: Vec<String>,
}

/// Some models wrap JSON in a Markdown code fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[async_trait]
impl<P: ?Sized + AIProvider> TextRefiner for LlmTextRefiner<P> {
    async fn refine(&self, text: &str, context: &str) -> Result<String, AIError> {
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, Self::refine_prompt(text, context));

        let response = self.provider.complete(request).await?;
        let refined = response.content.trim();
        if refined.is_empty() {
            return Err(AIError::parse("empty refinement"));
        }

        tracing::debug!(context, chars = refined.len(), "text refined");
        Ok(refined.to_string())
    }

    async fn suggest_scope(&self, project_name: &str) -> Result<Vec<String>, AIError> {
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, Self::scope_prompt(project_name))
            .expecting_json();

        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(AIError::parse("empty scope suggestion"));
        }

        let items = Self::parse_scope(&response.content)?;
        tracing::debug!(project_name, count = items.len(), "scope suggested");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::ResponseFormat;

    fn refiner(provider: MockAIProvider) -> (LlmTextRefiner<MockAIProvider>, Arc<MockAIProvider>) {
        let provider = Arc::new(provider);
        (LlmTextRefiner::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn refine_returns_trimmed_reply() {
        let (refiner, _) = refiner(MockAIProvider::new().with_response("  Texto elegante.\n"));

        let refined = refiner.refine("texto", "Objetivo").await.unwrap();

        assert_eq!(refined, "Texto elegante.");
    }

    #[tokio::test]
    async fn refine_prompt_carries_context_and_text() {
        let (refiner, provider) = refiner(MockAIProvider::new().with_response("ok"));

        refiner
            .refine("Vídeo curto", "Objetivo de um projeto de motion design")
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("Contexto da seção: Objetivo de um projeto de motion design"));
        assert!(prompt.contains("Texto Original: Vídeo curto"));
        assert_eq!(calls[0].response_format, ResponseFormat::Text);
    }

    #[tokio::test]
    async fn refine_blank_reply_is_error() {
        let (refiner, _) = refiner(MockAIProvider::new().with_response("   "));

        assert!(matches!(
            refiner.refine("texto", "ctx").await,
            Err(AIError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn refine_propagates_provider_error_without_retry() {
        let (refiner, provider) = refiner(
            MockAIProvider::new().with_error(MockError::Unavailable {
                message: "down".to_string(),
            }),
        );

        assert!(matches!(
            refiner.refine("texto", "ctx").await,
            Err(AIError::Unavailable { .. })
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn suggest_scope_parses_items_in_order() {
        let (refiner, provider) = refiner(MockAIProvider::new().with_response(
            r#"{"items": ["Roteiro", "Storyboard", " ", "Animação 2D"]}"#,
        ));

        let items = refiner.suggest_scope("Lançamento").await.unwrap();

        assert_eq!(items, vec!["Roteiro", "Storyboard", "Animação 2D"]);
        let call = &provider.get_calls()[0];
        assert_eq!(call.response_format, ResponseFormat::JsonObject);
        assert!(call.messages[0].content.contains("\"Lançamento\""));
    }

    #[tokio::test]
    async fn suggest_scope_accepts_fenced_json() {
        let (refiner, _) =
            refiner(MockAIProvider::new().with_response("```json\n{\"items\": [\"A\"]}\n```"));

        assert_eq!(refiner.suggest_scope("X").await.unwrap(), vec!["A"]);
    }

    #[tokio::test]
    async fn suggest_scope_malformed_reply_is_error() {
        let (refiner, _) = refiner(MockAIProvider::new().with_response("Roteiro, Storyboard"));

        assert!(matches!(
            refiner.suggest_scope("X").await,
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn strip_code_fence_leaves_plain_json() {
        assert_eq!(strip_code_fence(" {\"items\":[]} "), "{\"items\":[]}");
    }
}
