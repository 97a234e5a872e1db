use anyhow::{Context, Result};
use chunkmill::{
    validate_chunks, ChunkingEngine, ChunkingOptions, CompletionClient, DocumentType,
    EmbeddingClient, Strategy, Tokenizer, WhitespaceTokenizer,
};
use clap::Parser;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "chunkmill",
    about = "Split a document into embedding-ready chunks"
)]
struct Args {
    /// Path of the document to chunk
    path: String,

    /// Chunking strategy: fixed, recursive, semantic, agentic, hybrid
    #[arg(long, default_value = "recursive")]
    strategy: String,

    /// Document type: markdown, code, pdf, text, other
    #[arg(long, default_value = "text")]
    document_type: String,

    /// Token budget per chunk
    #[arg(long, default_value_t = 512)]
    max_chunk_size: usize,

    /// Character floor below which segments are dropped
    #[arg(long, default_value_t = 100)]
    min_chunk_size: usize,

    /// Token overlap between consecutive fixed-size windows
    #[arg(long, default_value_t = 50)]
    chunk_overlap: usize,

    /// Embedding server endpoint (semantic and hybrid strategies)
    #[arg(long, default_value = "http://localhost:18115")]
    embed_endpoint: String,

    /// Completion server endpoint (agentic strategy)
    #[arg(long, default_value = "http://localhost:18116")]
    llm_endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let start_time = Instant::now();
    println!("=== chunkmill: document chunking pipeline ===\n");

    // Step 1: read the document
    let step1_start = Instant::now();
    println!("Step 1: Reading document...");
    let content = std::fs::read_to_string(&args.path)
        .context(format!("Failed to read file: {}", args.path))?;
    println!(
        "✓ Loaded {} bytes [{:.2}s]\n",
        content.len(),
        step1_start.elapsed().as_secs_f64()
    );

    // Step 2: resolve options
    let strategy: Strategy = args.strategy.parse()?;
    let document_type: DocumentType = args.document_type.parse()?;
    let options = ChunkingOptions {
        strategy,
        document_type,
        max_chunk_size: args.max_chunk_size,
        min_chunk_size: args.min_chunk_size,
        chunk_overlap: args.chunk_overlap,
        ..Default::default()
    };
    println!(
        "Step 2: Using {} strategy (max {} tokens, min {} chars, overlap {})\n",
        strategy, options.max_chunk_size, options.min_chunk_size, options.chunk_overlap
    );

    // Step 3: chunk
    let step3_start = Instant::now();
    println!("Step 3: Chunking...");
    let engine = ChunkingEngine::new(
        WhitespaceTokenizer,
        EmbeddingClient::new(&args.embed_endpoint),
        CompletionClient::new(&args.llm_endpoint),
    );

    let chunks = match engine.chunk_document(&content, &options).await {
        Ok(chunks) => chunks,
        Err(e) => {
            eprintln!("✗ Chunking failed: {}", e);
            if matches!(strategy, Strategy::Semantic | Strategy::Hybrid) {
                eprintln!("\n  Make sure the embedding server is running at {}", args.embed_endpoint);
            }
            if matches!(strategy, Strategy::Agentic) {
                eprintln!("\n  Make sure the completion server is running at {}", args.llm_endpoint);
            }
            return Ok(());
        }
    };
    println!(
        "✓ Produced {} chunks [{:.2}s]\n",
        chunks.len(),
        step3_start.elapsed().as_secs_f64()
    );

    // Step 4: validate
    println!("Step 4: Validating chunks...\n");
    let report = validate_chunks(&chunks);
    for issue in &report.issues {
        println!("  issue: {}", issue);
    }
    for suggestion in &report.suggestions {
        println!("  suggestion: {}", suggestion);
    }
    println!(
        "✓ Validation {}\n",
        if report.valid { "passed" } else { "found issues" }
    );

    // Statistics
    let tokenizer = WhitespaceTokenizer;
    let total_tokens: usize = chunks
        .iter()
        .map(|c| tokenizer.count_tokens(&c.content))
        .sum();
    let embedded = chunks.iter().filter(|c| !c.embedding.is_empty()).count();

    println!("=== Pipeline Statistics ===");
    println!("Total chunks:         {}", chunks.len());
    println!("Total tokens:         {}", total_tokens);
    println!(
        "Avg tokens/chunk:     {:.1}",
        if chunks.is_empty() {
            0.0
        } else {
            total_tokens as f64 / chunks.len() as f64
        }
    );
    println!("Embedded chunks:      {}", embedded);
    println!("Issues found:         {}", report.issues.len());
    println!("─────────────────────────────────");
    println!(
        "Total execution:      {:.3}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
