//! AI Provider Adapters.
//!
//! Implementations of the AIProvider and TextRefiner ports.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - Any OpenAI-compatible chat-completions endpoint (Gemini by default)
//! - `LlmTextRefiner` - Proposal copy refinement on top of an AIProvider

mod llm_text_refiner;
mod mock_provider;
mod openai_provider;

pub use llm_text_refiner::LlmTextRefiner;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
