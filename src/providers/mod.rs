pub mod cache;
pub mod hashing;
pub mod ollama;
pub mod openai;
pub mod traits;

pub use cache::CachedEmbedder;
pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::EmbeddingProvider;

use crate::config::{ProviderKind, ScorerConfig};
use crate::error::{Result, ScoreError};
use std::num::NonZeroUsize;
use std::sync::Arc;

fn wrap<E: EmbeddingProvider + 'static>(inner: E, capacity: usize) -> Arc<dyn EmbeddingProvider> {
    match NonZeroUsize::new(capacity) {
        Some(capacity) => Arc::new(CachedEmbedder::new(inner, capacity)),
        None => Arc::new(inner),
    }
}

/// Builds the configured embedding provider, cached when the config asks for it.
pub fn create_provider(config: &ScorerConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider = match config.provider {
        ProviderKind::Ollama => wrap(OllamaEmbedder::new(config.ollama_url.clone()), config.cache_capacity),
        ProviderKind::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                ScoreError::ModelUnavailable("OPENAI_API_KEY must be set to use the openai provider".to_string())
            })?;
            wrap(OpenAiEmbedder::new(api_key, config.openai_api_base.clone()), config.cache_capacity)
        }
        ProviderKind::Hashing => wrap(HashingEmbedder::new(), config.cache_capacity),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_names() {
        let config = ScorerConfig::default();
        assert_eq!(create_provider(&config).unwrap().name(), "ollama");

        let config = ScorerConfig { provider: ProviderKind::Hashing, cache_capacity: 0, ..Default::default() };
        assert_eq!(create_provider(&config).unwrap().name(), "hashing");
    }

    #[test]
    fn test_openai_without_key_is_unavailable() {
        let config = ScorerConfig { provider: ProviderKind::OpenAi, ..Default::default() };
        assert!(matches!(create_provider(&config), Err(ScoreError::ModelUnavailable(_))));
    }
}
