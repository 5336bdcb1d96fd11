use anyhow::{Context, Result};
use bid_scorer::{create_provider, PdfExtractor, ProviderKind, ScoreError, Scorer, ScorerConfig};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

/// Scores how well a bid PDF addresses an RFP PDF.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the RFP PDF
    #[arg(long)]
    rfp: PathBuf,

    /// Path to the bid PDF
    #[arg(long)]
    bid: PathBuf,

    /// Characters per chunk
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Embedding model identifier
    #[arg(long)]
    model: Option<String>,

    /// Embedding provider: ollama, openai or hashing
    #[arg(long)]
    provider: Option<String>,

    #[arg(long)]
    ollama_url: Option<String>,

    /// Seconds to wait for each embedding request
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the result on one line
    #[arg(long)]
    compact: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn resolve_config(args: &Args) -> Result<ScorerConfig, ScoreError> {
    let mut config = ScorerConfig::from_env()?;

    if let Some(provider) = &args.provider {
        config.provider = provider.parse::<ProviderKind>()?;
        config.model = env::var("BID_SCORER_MODEL")
            .unwrap_or_else(|_| config.provider.default_model().to_string());
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(url) = &args.ollama_url {
        config.ollama_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.embed_timeout = Duration::from_secs(secs);
    }

    config.validate()?;
    Ok(config)
}

async fn run(args: &Args) -> Result<String> {
    let config = resolve_config(args)?;
    log::info!(
        "Scoring {} against {} with {} model {}",
        args.bid.display(),
        args.rfp.display(),
        config.provider,
        config.model
    );

    let embedder = create_provider(&config)?;
    let scorer = Scorer::new(Arc::new(PdfExtractor::new()), embedder, config)?;

    let result = scorer.score(&args.rfp, &args.bid).await?;
    result
        .to_json(!args.compact)
        .context("Failed to serialize score result")
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&args).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            let code = e.downcast_ref::<ScoreError>().map(ScoreError::exit_code).unwrap_or(1);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            process::exit(code);
        }
    }
}
