pub mod batcher;
pub mod client;
pub mod types;


pub use batcher::Batcher;
pub use client::{EmbedError, EmbeddingClient};
pub use types::{EmbeddingRequest, EmbeddingResponse};

use async_trait::async_trait;

/// Default number of texts per embedding request.
pub const DEFAULT_EMBED_BATCH: usize = 10;

/// Pause between consecutive embedding batches, in milliseconds.
pub const BATCH_DELAY_MS: u64 = 100;

/// Maps text to a fixed-length vector. Batching plus the inter-batch
/// delay are the engine's only throttling; retries belong to the caller.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}
