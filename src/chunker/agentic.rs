use super::chunk::Chunk;
use super::{ChunkError, ChunkingOptions};
use crate::llm::ChatModel;
use serde::Deserialize;
use thiserror::Error;

const SYSTEM_PROMPT: &str = "You are a document segmentation assistant. \
Given a document's title, structural outline, and content, propose chunk \
boundaries as character offsets into the content. Respond with a JSON \
object of the form {\"boundaries\": [{\"position\": int, \"type\": string, \
\"reason\": string, \"confidence\": float}], \"strategy\": string, \
\"reasoning\": string}.";

/// Characters of content included in the prompt.
const PROMPT_CONTENT_LIMIT: usize = 4000;
/// Lines of structural outline included in the prompt.
const OUTLINE_LINE_LIMIT: usize = 40;

const TEMPERATURE: f32 = 0.1;
const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Boundary list returned by the model.
#[derive(Debug, Deserialize)]
pub(crate) struct BoundaryPlan {
    #[serde(default)]
    pub boundaries: Vec<BoundarySpec>,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoundarySpec {
    /// Character offset into the original content
    pub position: usize,
    #[serde(default, rename = "type")]
    pub boundary_type: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    0.5
}

impl BoundaryPlan {
    fn fallback() -> Self {
        Self {
            boundaries: Vec::new(),
            strategy: "fallback".to_string(),
            reasoning: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum PlanParseError {
    #[error("response contains no JSON object")]
    NoJson,

    #[error("boundary JSON malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Ask the chat model for chunk boundaries and slice the content at the
/// positions it returns. An unparseable response degrades to a single
/// chunk; a failed chat call propagates.
pub(crate) async fn split_agentic(
    chat: &dyn ChatModel,
    content: &str,
    options: &ChunkingOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    let user_prompt = build_prompt(content);
    let response = chat
        .complete_chat(SYSTEM_PROMPT, &user_prompt, TEMPERATURE, MAX_OUTPUT_TOKENS)
        .await?;

    let plan = match parse_boundary_plan(&response) {
        Ok(plan) => plan,
        Err(err) => {
            tracing::warn!(%err, "falling back to a single chunk");
            BoundaryPlan::fallback()
        }
    };
    tracing::debug!(
        boundaries = plan.boundaries.len(),
        strategy = %plan.strategy,
        reasoning = %plan.reasoning,
        "applying boundary plan"
    );

    Ok(apply_boundaries(content, &plan, options))
}

fn build_prompt(content: &str) -> String {
    let title = content.lines().next().unwrap_or("").trim();
    let outline = build_outline(content);
    let excerpt: String = content.chars().take(PROMPT_CONTENT_LIMIT).collect();
    format!("Title: {title}\n\nOutline:\n{outline}\n\nContent:\n{excerpt}")
}

/// One structural tag per non-empty line: heading_N, code_block, table,
/// list, or paragraph. Fenced code bodies collapse into their opening tag.
fn build_outline(content: &str) -> String {
    let mut tags: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        if tags.len() == OUTLINE_LINE_LIMIT {
            break;
        }
        let line = line.trim_start();
        if line.starts_with("```") {
            if !in_fence {
                tags.push("code_block".to_string());
            }
            in_fence = !in_fence;
            continue;
        }
        if in_fence || line.is_empty() {
            continue;
        }

        let tag = if line.starts_with('#') {
            let depth = line.chars().take_while(|&c| c == '#').count();
            format!("heading_{depth}")
        } else if line.starts_with('|') {
            "table".to_string()
        } else if line.starts_with("- ") || line.starts_with("* ") {
            "list".to_string()
        } else {
            "paragraph".to_string()
        };
        tags.push(tag);
    }

    tags.join("\n")
}

/// Best-effort parse: extract the first balanced top-level JSON object
/// from the response, tolerating surrounding prose.
pub(crate) fn parse_boundary_plan(raw: &str) -> Result<BoundaryPlan, PlanParseError> {
    let json = extract_json_object(raw).ok_or(PlanParseError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}

fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Slice content at each boundary position (character offsets), one chunk
/// per interval plus a trailing chunk for the remainder.
fn apply_boundaries(content: &str, plan: &BoundaryPlan, options: &ChunkingOptions) -> Vec<Chunk> {
    let char_starts: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
    let to_byte = |position: usize| -> usize {
        char_starts.get(position).copied().unwrap_or(content.len())
    };

    let mut specs: Vec<&BoundarySpec> = plan.boundaries.iter().collect();
    specs.sort_by_key(|b| b.position);

    let mut chunks = Vec::new();
    let mut start = 0usize;

    for spec in specs {
        let end = to_byte(spec.position);
        if end <= start {
            continue;
        }
        tracing::trace!(
            position = spec.position,
            boundary_type = %spec.boundary_type,
            "cutting at boundary"
        );
        if let Some(mut chunk) = make_chunk(&content[start..end], start, end, options) {
            chunk.semantic_score = spec.confidence.clamp(0.0, 1.0);
            if !spec.reason.is_empty() {
                chunk.metadata.agentic_reason = Some(spec.reason.clone());
            }
            chunks.push(chunk);
        }
        start = end;
    }

    if start < content.len() {
        if let Some(chunk) = make_chunk(&content[start..], start, content.len(), options) {
            chunks.push(chunk);
        }
    }

    chunks
}

fn make_chunk(
    slice: &str,
    start: usize,
    end: usize,
    options: &ChunkingOptions,
) -> Option<Chunk> {
    let trimmed = slice.trim();
    if trimmed.is_empty() || trimmed.len() < options.min_chunk_size {
        return None;
    }
    Some(Chunk::new(trimmed, 0, start, end))
}
