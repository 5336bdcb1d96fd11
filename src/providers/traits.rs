use async_trait::async_trait;
use crate::error::Result;

/// Maps text chunks to embedding vectors.
///
/// Implementations own whatever expensive state they need (HTTP clients,
/// loaded models) and are built once, then shared across comparisons.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns one vector per chunk, in input order, all of the same
    /// model-defined dimensionality.
    async fn embed(&self, chunks: &[String], model: &str) -> Result<Vec<Vec<f32>>>;

    fn name(&self) -> &str;
}
