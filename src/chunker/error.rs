use crate::embedder::EmbedError;
use crate::llm::CompletionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("Unsupported chunking strategy: {0}")]
    UnsupportedStrategy(String),

    #[error("Invalid chunking options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Embedding(#[from] EmbedError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
