use super::chunk::{Chunk, ChunkType};
use super::{ChunkError, ChunkingOptions};
use crate::tokenizer::Tokenizer;

/// Slice the token stream into uniform windows of `max_chunk_size`
/// tokens, each overlapping its predecessor by `chunk_overlap` tokens.
pub(crate) fn split_fixed(
    tokenizer: &dyn Tokenizer,
    content: &str,
    options: &ChunkingOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    // An overlap as large as the window would pin the cursor in place.
    if options.chunk_overlap >= options.max_chunk_size {
        return Err(ChunkError::InvalidOptions(format!(
            "chunk_overlap ({}) must be smaller than max_chunk_size ({})",
            options.chunk_overlap, options.max_chunk_size
        )));
    }

    let tokens = tokenizer.tokenize(content);
    let mut chunks = Vec::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let end = (cursor + options.max_chunk_size).min(tokens.len());
        let text = tokenizer.detokenize(&tokens[cursor..end]);

        if text.len() >= options.min_chunk_size {
            let mut chunk = Chunk::new(&text, 0, 0, text.len());
            chunk.chunk_type = ChunkType::Paragraph;
            chunks.push(chunk);
        }

        if end >= tokens.len() {
            break;
        }
        cursor = end - options.chunk_overlap;
    }

    Ok(chunks)
}
