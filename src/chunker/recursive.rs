use super::chunk::Chunk;
use super::{ChunkingOptions, DocumentType};
use crate::tokenizer::Tokenizer;

/// Separator ladder for a document family, coarsest first. The trailing
/// empty string marks the character-window fallback.
fn separators_for(document_type: DocumentType) -> &'static [&'static str] {
    match document_type {
        DocumentType::Markdown => &["\n\n", "\n# ", "\n## ", "\n### ", "\n", " ", ""],
        DocumentType::Code => &[
            "\nclass ", "\nfunction ", "\nfn ", "\ndef ", "\n\n", "\n", " ", "",
        ],
        DocumentType::Pdf | DocumentType::Text | DocumentType::Other => {
            &["\n\n", "\n", ". ", " ", ""]
        }
    }
}

/// Hierarchically divide `content` on the document type's separator
/// ladder, falling through to finer separators (and deeper levels) for
/// any part that still exceeds the token budget.
pub(crate) fn split_recursive(
    tokenizer: &dyn Tokenizer,
    content: &str,
    options: &ChunkingOptions,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    split_with_separators(
        tokenizer,
        content,
        separators_for(options.document_type),
        0,
        options,
        &mut chunks,
    );
    chunks
}

fn split_with_separators(
    tokenizer: &dyn Tokenizer,
    content: &str,
    separators: &[&str],
    depth: usize,
    options: &ChunkingOptions,
    out: &mut Vec<Chunk>,
) {
    let token_count = tokenizer.count_tokens(content);

    if separators.is_empty() || token_count <= options.max_chunk_size {
        if token_count > options.max_chunk_size {
            tracing::warn!(
                tokens = token_count,
                max = options.max_chunk_size,
                "emitting oversized leaf after exhausting separators"
            );
        }
        emit(content, depth, options, out);
        return;
    }

    let separator = separators[0];
    let rest = &separators[1..];

    if separator.is_empty() {
        // Character windows: a window of N characters can never exceed
        // N tokens, so the budget holds without further recursion.
        for piece in char_windows(content, options.max_chunk_size) {
            emit(piece, depth, options, out);
        }
        return;
    }

    for part in content.split(separator) {
        if part.trim().is_empty() {
            continue;
        }
        if tokenizer.count_tokens(part) <= options.max_chunk_size {
            emit(part, depth, options, out);
        } else {
            split_with_separators(tokenizer, part, rest, depth + 1, options, out);
        }
    }
}

fn emit(content: &str, level: usize, options: &ChunkingOptions, out: &mut Vec<Chunk>) {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.len() < options.min_chunk_size {
        return;
    }
    out.push(Chunk::new(trimmed, level, 0, trimmed.len()));
}

/// Split `content` into consecutive windows of at most `window` characters,
/// respecting UTF-8 boundaries.
fn char_windows(content: &str, window: usize) -> Vec<&str> {
    let window = window.max(1);
    let boundaries: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < boundaries.len() {
        let end = boundaries
            .get(start + window)
            .copied()
            .unwrap_or(content.len());
        pieces.push(&content[boundaries[start]..end]);
        start += window;
    }
    pieces
}
