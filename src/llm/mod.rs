pub mod client;
pub mod types;

pub use client::{CompletionClient, CompletionError};
pub use types::{CompletionRequest, CompletionResponse};

use async_trait::async_trait;

/// Chat-completion collaborator used for LLM-guided boundary selection.
/// One call per chunking invocation; the engine adds no retry or backoff.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete_chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}
