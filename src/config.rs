use crate::error::{Result, ScoreError};
use crate::providers::hashing::DEFAULT_HASHING_MODEL;
use crate::providers::ollama::ollama::{DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use crate::providers::openai::openai::DEFAULT_OPENAI_MODEL;
use crate::text::DEFAULT_CHUNK_SIZE;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    OpenAi,
    Hashing,
}

impl ProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => DEFAULT_OLLAMA_MODEL,
            ProviderKind::OpenAi => DEFAULT_OPENAI_MODEL,
            ProviderKind::Hashing => DEFAULT_HASHING_MODEL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "hashing" => Ok(ProviderKind::Hashing),
            other => Err(ScoreError::InvalidArgument(format!(
                "unknown embedding provider {:?} (expected ollama, openai or hashing)",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Hashing => "hashing",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct ScorerConfig {
    pub chunk_size: usize,
    pub model: String,
    pub provider: ProviderKind,
    pub ollama_url: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: Option<String>,
    pub embed_timeout: Duration,
    /// Number of chunk embeddings kept in memory; 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            model: ProviderKind::Ollama.default_model().to_string(),
            provider: ProviderKind::Ollama,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            openai_api_key: None,
            openai_api_base: None,
            embed_timeout: Duration::from_secs(DEFAULT_EMBED_TIMEOUT_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ScoreError::InvalidArgument(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

impl ScorerConfig {
    /// Reads `BID_SCORER_*`, `OLLAMA_BASE_URL` and `OPENAI_*` variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let provider = match env::var("BID_SCORER_PROVIDER") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.provider,
        };

        let model = env::var("BID_SCORER_MODEL")
            .unwrap_or_else(|_| provider.default_model().to_string());

        Ok(Self {
            chunk_size: parse_var("BID_SCORER_CHUNK_SIZE")?.unwrap_or(defaults.chunk_size),
            model,
            provider,
            ollama_url: env::var("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_url),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_api_base: env::var("OPENAI_API_BASE").ok(),
            embed_timeout: parse_var("BID_SCORER_EMBED_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.embed_timeout),
            cache_capacity: parse_var("BID_SCORER_CACHE_CAPACITY")?.unwrap_or(defaults.cache_capacity),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ScoreError::InvalidArgument(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ScoreError::InvalidArgument("model identifier is empty".to_string()));
        }
        if self.embed_timeout.is_zero() {
            return Err(ScoreError::InvalidArgument("embedding timeout must be positive".to_string()));
        }
        Ok(())
    }
}
