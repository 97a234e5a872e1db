// client.rs - the HTTP embedding client
use crate::embedder::types::{EmbeddingRequest, EmbeddingResponse};
use crate::embedder::Embedder;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Expected {expected} embeddings, server returned {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Embedding backend error: {0}")]
    Backend(String),
}

pub struct EmbeddingClient {
    http: Client,
    endpoint: String,
}

impl EmbeddingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(60))
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

    async fn request(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let expected = texts.len();
        let req = EmbeddingRequest { texts };
        let response = self
            .http
            .post(format!("{}/embed", self.endpoint))
            .json(&req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EmbedError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let res: EmbeddingResponse = response.json().await?;
        if res.embeddings.len() != expected {
            return Err(EmbedError::ShapeMismatch {
                expected,
                actual: res.embeddings.len(),
            });
        }

        Ok(res.embeddings)
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut embeddings = self.request(vec![text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| EmbedError::Backend("server returned no embedding".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        self.request(texts.to_vec()).await
    }
}
