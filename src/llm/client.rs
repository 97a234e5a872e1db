use crate::llm::types::{CompletionRequest, CompletionResponse};
use crate::llm::ChatModel;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Completion backend error: {0}")]
    Backend(String),
}

pub struct CompletionClient {
    http: Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(180)) // 3 min for LLM generation
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatModel for CompletionClient {
    async fn complete_chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let req = CompletionRequest {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            temperature,
            max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/complete", self.endpoint))
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let res: CompletionResponse = response.json().await?;
        Ok(res.content)
    }
}
