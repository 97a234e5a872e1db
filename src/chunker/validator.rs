use super::chunk::Chunk;
use serde::Serialize;

/// Content shorter than this is flagged as too short.
const MIN_CONTENT_CHARS: usize = 50;
/// Chunks with fewer words than this are flagged.
const MIN_WORDS: usize = 5;
/// Above this many chunks, suggest a larger chunk size.
const MAX_REASONABLE_CHUNKS: usize = 100;
/// Below this many chunks, suggest a smaller chunk size.
const MIN_REASONABLE_CHUNKS: usize = 5;

/// Advisory quality report. Issues describe individual chunks;
/// suggestions describe the configuration. Nothing here rejects or
/// mutates chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

pub fn validate_chunks(chunks: &[Chunk]) -> ValidationReport {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.content.len() < MIN_CONTENT_CHARS {
            issues.push(format!(
                "Chunk {i} is too short ({} chars)",
                chunk.content.len()
            ));
        }
        if !chunk.content.ends_with(['.', '!', '?']) {
            issues.push(format!("Chunk {i} is missing terminal punctuation"));
        }
        if chunk.content.split_whitespace().count() < MIN_WORDS {
            issues.push(format!("Chunk {i} has too few words"));
        }
    }

    if chunks.len() > MAX_REASONABLE_CHUNKS {
        suggestions.push(format!(
            "Document produced {} chunks; consider increasing max_chunk_size",
            chunks.len()
        ));
    } else if chunks.len() < MIN_REASONABLE_CHUNKS {
        suggestions.push(format!(
            "Document produced only {} chunks; consider decreasing max_chunk_size",
            chunks.len()
        ));
    }

    ValidationReport {
        valid: issues.is_empty(),
        issues,
        suggestions,
    }
}
