// Public API exports
pub mod chunker;
pub mod embedder;
pub mod llm;
pub mod similarity;
pub mod tokenizer;

// Re-export main types for convenience
pub use chunker::{
    validate_chunks, Chunk, ChunkError, ChunkMetadata, ChunkType, ChunkingEngine,
    ChunkingOptions, DocumentType, Strategy, ValidationReport,
};

pub use embedder::{Batcher, EmbedError, Embedder, EmbeddingClient, DEFAULT_EMBED_BATCH};

pub use llm::{ChatModel, CompletionClient, CompletionError};

pub use similarity::{cosine_distance, cosine_similarity};

pub use tokenizer::{Tokenizer, WhitespaceTokenizer};
