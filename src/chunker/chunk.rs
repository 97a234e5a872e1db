use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Most keywords attached to a single chunk.
const MAX_KEYWORDS: usize = 10;

/// A chunk of text ready for embedding/indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// The chunk's text, trimmed of surrounding whitespace
    pub content: String,
    /// Structural classification inferred from leading syntax
    pub chunk_type: ChunkType,
    /// Recursion depth that produced this chunk (0 for flat strategies)
    pub level: usize,
    /// Filled by the embedding pass; empty until then
    pub embedding: Vec<f32>,
    /// Boundary confidence in [0,1]; 0.5 when the strategy has no signal
    pub semantic_score: f32,
    /// Offsets into the strategy's working buffer, not the original document
    pub start_index: usize,
    pub end_index: usize,
    pub metadata: ChunkMetadata,
}

/// Metadata for a chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Up to ten deduplicated keywords, in order of first appearance
    pub keywords: Vec<String>,
    /// Boundary justification, set only by the agentic path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agentic_reason: Option<String>,
}

/// Structural classification of a chunk's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Heading,
    Code,
    Table,
    List,
    Quote,
    Paragraph,
}

impl ChunkType {
    /// Classify content by its leading syntax.
    pub fn infer(content: &str) -> Self {
        let head = content.trim_start();
        if head.starts_with('#') {
            Self::Heading
        } else if head.starts_with("```") {
            Self::Code
        } else if head.starts_with('|') {
            Self::Table
        } else if head.starts_with("- ") || head.starts_with("* ") || starts_ordered_list(head) {
            Self::List
        } else if head.starts_with('>') {
            Self::Quote
        } else {
            Self::Paragraph
        }
    }
}

fn starts_ordered_list(s: &str) -> bool {
    let digits = s.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && s[digits..].starts_with(". ")
}

impl Chunk {
    /// Create a chunk from a span of strategy output. Content is trimmed;
    /// type and keywords are derived from it.
    pub fn new(content: &str, level: usize, start_index: usize, end_index: usize) -> Self {
        let content = content.trim().to_string();
        Self {
            id: Uuid::new_v4().to_string(),
            chunk_type: ChunkType::infer(&content),
            level,
            embedding: Vec::new(),
            semantic_score: 0.5,
            start_index,
            end_index,
            metadata: ChunkMetadata {
                keywords: extract_keywords(&content),
                agentic_reason: None,
            },
            content,
        }
    }
}

/// Pull up to [`MAX_KEYWORDS`] lowercase words (length > 2) out of the
/// content, deduplicated, in order of first appearance.
pub(crate) fn extract_keywords(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for word in content.split(|c: char| !c.is_alphanumeric()) {
        if word.len() <= 2 {
            continue;
        }
        let word = word.to_lowercase();
        if seen.insert(word.clone()) {
            keywords.push(word);
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}
