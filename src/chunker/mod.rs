mod agentic;
mod chunk;
mod error;
mod fixed;
mod hybrid;
mod recursive;
mod semantic;
mod validator;


pub use chunk::{Chunk, ChunkMetadata, ChunkType};
pub use error::ChunkError;
pub use validator::{validate_chunks, ValidationReport};

use crate::embedder::{Batcher, Embedder, BATCH_DELAY_MS, DEFAULT_EMBED_BATCH};
use crate::llm::ChatModel;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The five splitting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Fixed,
    Recursive,
    Semantic,
    Agentic,
    Hybrid,
}

impl FromStr for Strategy {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "recursive" => Ok(Self::Recursive),
            "semantic" => Ok(Self::Semantic),
            "agentic" => Ok(Self::Agentic),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(ChunkError::UnsupportedStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixed => "fixed",
            Self::Recursive => "recursive",
            Self::Semantic => "semantic",
            Self::Agentic => "agentic",
            Self::Hybrid => "hybrid",
        };
        f.write_str(name)
    }
}

/// Document family; selects the separator ladder for recursive splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Markdown,
    Code,
    Pdf,
    Text,
    Other,
}

impl FromStr for DocumentType {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "code" => Ok(Self::Code),
            "pdf" => Ok(Self::Pdf),
            "text" => Ok(Self::Text),
            "other" => Ok(Self::Other),
            unknown => Err(ChunkError::InvalidOptions(format!(
                "unknown document type: {unknown}"
            ))),
        }
    }
}

/// Caller-supplied chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingOptions {
    pub strategy: Strategy,
    /// Token budget per chunk
    pub max_chunk_size: usize,
    /// Character floor below which a candidate segment is dropped
    pub min_chunk_size: usize,
    /// Tokens repeated between consecutive fixed-size windows
    pub chunk_overlap: usize,
    /// Informational; strategies already preserve structure where they can
    pub preserve_structure: bool,
    pub document_type: DocumentType,
    /// Adjacent-sentence similarity below this opens a semantic boundary
    pub semantic_threshold: f32,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Recursive,
            max_chunk_size: 512,
            min_chunk_size: 100,
            chunk_overlap: 50,
            preserve_structure: true,
            document_type: DocumentType::Text,
            semantic_threshold: 0.7,
        }
    }
}

impl ChunkingOptions {
    fn validate(&self) -> Result<(), ChunkError> {
        if self.max_chunk_size == 0 {
            return Err(ChunkError::InvalidOptions(
                "max_chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// The chunking engine: one dispatcher over five strategies, with the
/// tokenizer, embedder, and chat model injected so callers can swap
/// providers (or test doubles) freely. Holds no mutable state, so
/// independent documents may be chunked concurrently.
pub struct ChunkingEngine {
    tokenizer: Box<dyn Tokenizer>,
    embedder: Box<dyn Embedder>,
    chat: Box<dyn ChatModel>,
}

impl ChunkingEngine {
    pub fn new(
        tokenizer: impl Tokenizer + 'static,
        embedder: impl Embedder + 'static,
        chat: impl ChatModel + 'static,
    ) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            embedder: Box::new(embedder),
            chat: Box::new(chat),
        }
    }

    /// Split `content` with the strategy selected in `options`.
    /// Strategy errors propagate unchanged.
    pub async fn chunk_document(
        &self,
        content: &str,
        options: &ChunkingOptions,
    ) -> Result<Vec<Chunk>, ChunkError> {
        options.validate()?;
        tracing::debug!(strategy = %options.strategy, bytes = content.len(), "chunking document");

        match options.strategy {
            Strategy::Fixed => fixed::split_fixed(self.tokenizer.as_ref(), content, options),
            Strategy::Recursive => Ok(recursive::split_recursive(
                self.tokenizer.as_ref(),
                content,
                options,
            )),
            Strategy::Semantic => {
                semantic::split_semantic(self.embedder.as_ref(), content, options).await
            }
            Strategy::Agentic => {
                agentic::split_agentic(self.chat.as_ref(), content, options).await
            }
            Strategy::Hybrid => {
                hybrid::split_hybrid(
                    self.tokenizer.as_ref(),
                    self.embedder.as_ref(),
                    self.chat.as_ref(),
                    content,
                    options,
                )
                .await
            }
        }
    }

    /// Fill the `embedding` field of every chunk, batch by batch.
    pub async fn embed_chunks(&self, chunks: &mut [Chunk]) -> Result<(), ChunkError> {
        embed_all(self.embedder.as_ref(), chunks).await
    }
}

/// Batch-embed chunk contents in place.
pub(crate) async fn embed_all(
    embedder: &dyn Embedder,
    chunks: &mut [Chunk],
) -> Result<(), ChunkError> {
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = embed_texts(embedder, &texts).await?;
    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = embedding;
    }
    Ok(())
}

/// Embed texts in order, [`DEFAULT_EMBED_BATCH`] at a time, pausing
/// [`BATCH_DELAY_MS`] between batches.
pub(crate) async fn embed_texts(
    embedder: &dyn Embedder,
    texts: &[String],
) -> Result<Vec<Vec<f32>>, ChunkError> {
    let batcher = Batcher::new(DEFAULT_EMBED_BATCH);
    let batches = batcher.split(texts);
    let last = batches.len().saturating_sub(1);

    let mut embeddings = Vec::with_capacity(texts.len());
    for (i, batch) in batches.into_iter().enumerate() {
        embeddings.extend(embedder.embed_batch(batch).await?);
        if i < last {
            tokio::time::sleep(Duration::from_millis(BATCH_DELAY_MS)).await;
        }
    }

    Ok(embeddings)
}
