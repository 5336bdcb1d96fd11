use async_trait::async_trait;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateEmbeddingRequestArgs, EmbeddingInput},
    Client,
};
use crate::error::{Result, ScoreError};
use crate::providers::traits::EmbeddingProvider;
use log::info;

pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";

/// Embeds chunks with the OpenAI embeddings API, or any server speaking it.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client<OpenAIConfig>,
}

impl OpenAiEmbedder {
    pub fn new(api_key: impl Into<String>, api_base: Option<String>) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base.trim_end_matches('/'));
        }
        Self {
            client: Client::with_config(config),
        }
    }
}

fn map_openai_error(err: OpenAIError) -> ScoreError {
    match err {
        OpenAIError::Reqwest(e) => ScoreError::ModelUnavailable(format!("cannot reach embeddings API: {}", e)),
        OpenAIError::ApiError(api) => {
            let code = api.code.as_ref().map(|c| c.to_string()).unwrap_or_default();
            if code.contains("model_not_found") || code.contains("invalid_api_key") {
                ScoreError::ModelUnavailable(api.message)
            } else {
                ScoreError::InferenceFailure(api.message)
            }
        }
        other => ScoreError::InferenceFailure(other.to_string()),
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, chunks: &[String], model: &str) -> Result<Vec<Vec<f32>>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        info!("Requesting {} embeddings from OpenAI with model {}", chunks.len(), model);

        let request = CreateEmbeddingRequestArgs::default()
            .model(model)
            .input(EmbeddingInput::StringArray(chunks.to_vec()))
            .build()
            .map_err(|e| ScoreError::InvalidArgument(e.to_string()))?;

        let response = self.client.embeddings().create(request).await
            .map_err(map_openai_error)?;

        if response.data.len() != chunks.len() {
            return Err(ScoreError::InferenceFailure(format!(
                "embeddings API returned {} vectors for {} chunks",
                response.data.len(),
                chunks.len()
            )));
        }

        let mut data = response.data;
        data.sort_by_key(|e| e.index);
        Ok(data.into_iter().map(|e| e.embedding).collect())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
