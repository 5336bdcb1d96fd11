use async_trait::async_trait;
use crate::error::{Result, ScoreError};
use crate::providers::traits::EmbeddingProvider;

pub const DEFAULT_HASHING_MODEL: &str = "hashing-256";
pub const MAX_HASHING_DIMENSION: usize = 65_536;

/// Offline bag-of-words embedder using feature hashing.
///
/// Captures shared vocabulary only, not meaning. Useful when no model
/// server is reachable. The model id selects the dimension: `hashing-<dim>`.
#[derive(Debug, Clone, Default)]
pub struct HashingEmbedder;

impl HashingEmbedder {
    pub fn new() -> Self {
        Self
    }

    fn dimension(model: &str) -> Result<usize> {
        model
            .strip_prefix("hashing-")
            .and_then(|d| d.parse::<usize>().ok())
            .filter(|d| (1..=MAX_HASHING_DIMENSION).contains(d))
            .ok_or_else(|| ScoreError::ModelUnavailable(format!(
                "unknown hashing model {:?}, expected hashing-<dimension> with dimension 1..={}",
                model, MAX_HASHING_DIMENSION
            )))
    }

    fn bucket(token: &str, dimension: usize) -> usize {
        let mut hash = 0usize;
        for byte in token.bytes() {
            hash = hash.wrapping_mul(31).wrapping_add(byte as usize);
        }
        hash % dimension
    }

    fn embed_one(text: &str, dimension: usize) -> Vec<f32> {
        let mut embedding = vec![0.0f32; dimension];
        for token in text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            embedding[Self::bucket(token, dimension)] += 1.0;
        }

        let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in &mut embedding {
                *val /= norm;
            }
        }
        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, chunks: &[String], model: &str) -> Result<Vec<Vec<f32>>> {
        let dimension = Self::dimension(model)?;
        Ok(chunks.iter().map(|c| Self::embed_one(c, dimension)).collect())
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
