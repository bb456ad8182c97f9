use anyhow::bail;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rag_chat_core::{
    detect_file_type, extract_text, ChatCompletionsClient, ChatOrchestrator, ChunkStrategy,
    ConversationMemory, Embedder, HashEmbedder, HttpEmbedder, InMemoryConversationStore,
    InMemoryDocumentStore, IngestionOptions, IngestionPipeline, QdrantStore, Retriever,
    VectorIndex, DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_MEMORY_CAP, DEFAULT_WORDS_PER_CHUNK,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rag-chat", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Qdrant base URL
    #[arg(long, env = "QDRANT_URL", default_value = "http://localhost:6333")]
    qdrant_url: String,

    /// Qdrant collection holding document chunks
    #[arg(long, default_value = "documents")]
    collection: String,

    /// Sentence-embedding server base URL; the deterministic hash embedder
    /// is used when unset.
    #[arg(long, env = "EMBEDDING_URL")]
    embedding_url: Option<String>,

    /// Embedding dimensionality (must match the collection)
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIMENSIONS)]
    embedding_dimensions: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Create the vector collection (cosine distance) if it does not exist.
    Setup,
    /// Ingest one document (.pdf or .txt): extract, chunk, embed, index.
    Ingest {
        /// Path to the document
        #[arg(long)]
        file: String,
        /// Chunking strategy: "fixed" or "paragraph"
        #[arg(long, default_value = "fixed")]
        strategy: String,
        /// Words per chunk for the fixed strategy
        #[arg(long, default_value_t = DEFAULT_WORDS_PER_CHUNK)]
        words_per_chunk: usize,
    },
    /// Run one or more conversation turns against the indexed documents.
    Chat {
        /// User query; repeat the flag to run several turns in one session
        #[arg(long = "query", required = true)]
        queries: Vec<String>,
        /// Session identifier scoping conversation memory
        #[arg(long, default_value = "cli")]
        session: String,
        /// Number of excerpts to retrieve per turn
        #[arg(long)]
        top_k: Option<usize>,
        /// Skip the conversation-memory block in the prompt
        #[arg(long, default_value_t = false)]
        no_memory: bool,
        /// Clear the session's conversation memory before the first turn
        #[arg(long, default_value_t = false)]
        reset: bool,
        /// Retained messages per session
        #[arg(long, default_value_t = DEFAULT_MEMORY_CAP)]
        memory_cap: usize,
        /// OpenAI-compatible chat-completions endpoint
        #[arg(
            long,
            env = "LLM_URL",
            default_value = "https://api.groq.com/openai/v1/chat/completions"
        )]
        llm_url: String,
        /// Bearer token for the LLM endpoint
        #[arg(long, env = "LLM_API_KEY")]
        llm_api_key: Option<String>,
        /// Model name passed to the LLM endpoint
        #[arg(long, env = "LLM_MODEL", default_value = "llama-3.3-70b-versatile")]
        llm_model: String,
        /// Maximum tokens in the completion
        #[arg(long, default_value_t = 512)]
        llm_max_tokens: u32,
    },
}

fn build_embedder(embedding_url: Option<&str>, dimensions: usize) -> Box<dyn Embedder> {
    match embedding_url {
        Some(url) => Box::new(HttpEmbedder::new(url, dimensions)),
        None => Box::new(HashEmbedder { dimensions }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let embedder = build_embedder(cli.embedding_url.as_deref(), cli.embedding_dimensions);
    let index = QdrantStore::new(&cli.qdrant_url, &cli.collection, embedder.dimensions());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        collection = %cli.collection,
        "rag-chat boot"
    );

    match cli.command {
        Command::Setup => {
            index
                .ensure_collection(embedder.dimensions())
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            println!(
                "collection {} ready ({} dimensions, cosine)",
                cli.collection,
                embedder.dimensions()
            );
        }
        Command::Ingest {
            file,
            strategy,
            words_per_chunk,
        } => {
            let strategy = match strategy.as_str() {
                "fixed" => ChunkStrategy::Fixed,
                "paragraph" => ChunkStrategy::Paragraph,
                other => bail!("unknown chunking strategy: {other}"),
            };

            let path = Path::new(&file);
            let filetype = detect_file_type(path)?;
            let text = extract_text(path, filetype)?;

            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| file.clone());

            let pipeline = IngestionPipeline::new(
                embedder,
                index,
                InMemoryDocumentStore::new(),
                IngestionOptions { words_per_chunk },
            );

            let metadata = pipeline
                .ingest(&text, &filename, filetype, strategy)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            println!(
                "document {} indexed: {} chunks, {} vector ids",
                metadata.id,
                metadata.number_of_chunks,
                metadata.vector_ids.len()
            );
        }
        Command::Chat {
            queries,
            session,
            top_k,
            no_memory,
            reset,
            memory_cap,
            llm_url,
            llm_api_key,
            llm_model,
            llm_max_tokens,
        } => {
            let llm = ChatCompletionsClient::new(llm_url, llm_api_key, llm_model, llm_max_tokens);
            let memory = InMemoryConversationStore::new(memory_cap);
            if reset {
                memory
                    .clear(&session)
                    .await
                    .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            }
            let orchestrator =
                ChatOrchestrator::new(Retriever::new(embedder, index), memory, llm);

            for query in queries {
                let turn = orchestrator
                    .turn(Some(&session), &query, top_k, !no_memory)
                    .await
                    .map_err(|error| anyhow::anyhow!(error.to_string()))?;

                println!("query: {query}");
                println!("answer: {}", turn.answer);
                for (position, hit) in turn.sources.iter().enumerate() {
                    println!(
                        "[{}] score={:.4} file={} chunk_id={}",
                        position + 1,
                        hit.score,
                        hit.filename,
                        hit.chunk_id
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| "-".to_string())
                    );
                    if !hit.chunk.is_empty() {
                        println!("  {}", hit.chunk);
                    }
                }
            }
        }
    }

    Ok(())
}
