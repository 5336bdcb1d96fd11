use async_trait::async_trait;
use crate::error::{Result, ScoreError};
use crate::providers::traits::EmbeddingProvider;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "nomic-embed-text";

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Embeds chunks through a local Ollama server's `/api/embed` endpoint.
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
}

impl OllamaEmbedder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, chunks: &[String], model: &str) -> Result<Vec<Vec<f32>>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        info!("Requesting {} embeddings from {} with model {}", chunks.len(), url, model);

        let response = self.client
            .post(&url)
            .json(&EmbedRequest { model, input: chunks })
            .send()
            .await
            .map_err(|e| ScoreError::ModelUnavailable(format!("cannot reach Ollama at {}: {}", self.base_url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoreError::ModelUnavailable(format!("model {} not found: {}", model, body.trim())));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoreError::InferenceFailure(format!("Ollama returned {}: {}", status, body.trim())));
        }

        let parsed: EmbedResponse = response.json().await
            .map_err(|e| ScoreError::InferenceFailure(format!("malformed Ollama response: {}", e)))?;

        if parsed.embeddings.len() != chunks.len() {
            return Err(ScoreError::InferenceFailure(format!(
                "Ollama returned {} embeddings for {} chunks",
                parsed.embeddings.len(),
                chunks.len()
            )));
        }

        debug!(
            "Ollama embeddings have {} dimensions",
            parsed.embeddings.first().map(Vec::len).unwrap_or(0)
        );
        Ok(parsed.embeddings)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScorerConfig;

    #[test]
    fn test_base_url_comes_from_config() {
        let config = ScorerConfig::default();
        let embedder = OllamaEmbedder::new(config.ollama_url);
        assert_eq!(embedder.base_url(), DEFAULT_OLLAMA_URL);

        let embedder = OllamaEmbedder::new("http://gpu-box:11434/");
        assert_eq!(embedder.base_url(), "http://gpu-box:11434");
    }
}
