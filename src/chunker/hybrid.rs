use super::chunk::Chunk;
use super::{embed_texts, recursive, semantic, ChunkError, ChunkingOptions};
use crate::embedder::Embedder;
use crate::llm::ChatModel;
use crate::tokenizer::Tokenizer;

/// Coarse structural pass first, then semantic refinement of anything
/// still over budget. The cheap recursive splitter runs with a doubled
/// budget; only chunks that exceed the original budget pay for
/// embeddings-based re-splitting.
pub(crate) async fn split_hybrid(
    tokenizer: &dyn Tokenizer,
    embedder: &dyn Embedder,
    chat: &dyn ChatModel,
    content: &str,
    options: &ChunkingOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    let coarse_options = ChunkingOptions {
        max_chunk_size: options.max_chunk_size * 2,
        ..options.clone()
    };
    let coarse = recursive::split_recursive(tokenizer, content, &coarse_options);

    let mut refined = Vec::with_capacity(coarse.len());
    for chunk in coarse {
        if tokenizer.count_tokens(&chunk.content) > options.max_chunk_size {
            let sub = semantic::split_semantic(embedder, &chunk.content, options).await?;
            refined.extend(sub);
        } else {
            refined.push(chunk);
        }
    }

    let mut refined = refine_boundaries(chat, refined).await?;
    fill_missing_embeddings(embedder, &mut refined).await?;
    Ok(refined)
}

/// Reserved LLM post-processing step. Boundary adjustment is not wired
/// up yet, so the chunk list passes through unchanged.
async fn refine_boundaries(
    _chat: &dyn ChatModel,
    chunks: Vec<Chunk>,
) -> Result<Vec<Chunk>, ChunkError> {
    Ok(chunks)
}

/// Chunks kept from the coarse pass have no embedding; the semantic
/// sub-chunks already carry theirs.
async fn fill_missing_embeddings(
    embedder: &dyn Embedder,
    chunks: &mut [Chunk],
) -> Result<(), ChunkError> {
    let missing: Vec<usize> = chunks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.embedding.is_empty())
        .map(|(i, _)| i)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let texts: Vec<String> = missing.iter().map(|&i| chunks[i].content.clone()).collect();
    let embeddings = embed_texts(embedder, &texts).await?;
    for (&i, embedding) in missing.iter().zip(embeddings) {
        chunks[i].embedding = embedding;
    }
    Ok(())
}
