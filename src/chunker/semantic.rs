use super::chunk::Chunk;
use super::{embed_all, embed_texts, ChunkError, ChunkingOptions};
use crate::embedder::Embedder;
use crate::similarity::cosine_similarity;

/// Boundary recorded after a sentence whose similarity to its successor
/// falls below the configured threshold.
struct SentenceBoundary {
    after: usize,
    confidence: f32,
}

/// Split at topic shifts: embed each sentence, compare adjacent pairs by
/// cosine similarity, and cut wherever the similarity drops below
/// `options.semantic_threshold`. Emitted chunks get a chunk-level
/// embedding as a final pass.
pub(crate) async fn split_semantic(
    embedder: &dyn Embedder,
    content: &str,
    options: &ChunkingOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    let sentences = split_sentences(content);
    if sentences.is_empty() {
        return Ok(vec![]);
    }

    let embeddings = embed_texts(embedder, &sentences).await?;

    let mut boundaries = Vec::new();
    for i in 0..embeddings.len().saturating_sub(1) {
        let similarity = cosine_similarity(&embeddings[i], &embeddings[i + 1]);
        if similarity < options.semantic_threshold {
            boundaries.push(SentenceBoundary {
                after: i,
                confidence: 1.0 - similarity,
            });
        }
    }

    let mut chunks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for (i, sentence) in sentences.iter().enumerate() {
        buffer.push(sentence);

        let boundary = boundaries.iter().find(|b| b.after == i);
        let is_last = i + 1 == sentences.len();
        if boundary.is_none() && !is_last {
            continue;
        }

        let text = buffer.join(". ");
        buffer.clear();
        if text.len() < options.min_chunk_size {
            continue;
        }

        let mut chunk = Chunk::new(&text, 0, 0, text.len());
        chunk.semantic_score = boundary.map_or(0.5, |b| b.confidence.clamp(0.0, 1.0));
        chunks.push(chunk);
    }

    embed_all(embedder, &mut chunks).await?;
    Ok(chunks)
}

/// Split on runs of terminal punctuation, dropping the terminators and
/// any empty fragments.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
