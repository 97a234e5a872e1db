// tokenizer.rs - token accounting for chunk budgets

/// Turns text into tokens for length accounting and back again.
///
/// The chunking engine only ever counts tokens and round-trips windows of
/// them; it never inspects individual tokens. Any tokenizer whose
/// `detokenize` inverts `tokenize` (up to whitespace normalization) works.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn detokenize(&self, tokens: &[String]) -> String;

    fn count_tokens(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}

/// Whitespace tokenizer: one token per whitespace-separated word.
///
/// Matches the ~token granularity of common embedding models closely
/// enough for budget checks, and round-trips exactly for single-spaced
/// text.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn detokenize(&self, tokens: &[String]) -> String {
        tokens.join(" ")
    }

    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}
