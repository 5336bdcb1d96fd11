use async_trait::async_trait;
use crate::error::{Result, ScoreError};
use crate::providers::traits::EmbeddingProvider;
use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Keeps recently computed chunk embeddings so repeated documents (the same
/// RFP scored against several bids) are embedded once.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<LruCache<(String, String), Vec<f32>>>,
}

impl<E: EmbeddingProvider> CachedEmbedder<E> {
    pub fn new(inner: E, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}

#[async_trait]
impl<E: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<E> {
    async fn embed(&self, chunks: &[String], model: &str) -> Result<Vec<Vec<f32>>> {
        let mut slots: Vec<Option<Vec<f32>>> = Vec::with_capacity(chunks.len());
        let mut misses = Vec::new();
        let mut miss_positions = Vec::new();

        {
            let mut cache = self.cache.lock();
            for (i, chunk) in chunks.iter().enumerate() {
                let hit = cache.get(&(model.to_string(), chunk.clone())).cloned();
                if hit.is_none() {
                    misses.push(chunk.clone());
                    miss_positions.push(i);
                }
                slots.push(hit);
            }
        }

        debug!(
            "Embedding cache: {} hits, {} misses",
            chunks.len() - misses.len(),
            misses.len()
        );

        if !misses.is_empty() {
            let computed = self.inner.embed(&misses, model).await?;
            if computed.len() != misses.len() {
                return Err(ScoreError::InferenceFailure(format!(
                    "{} returned {} embeddings for {} chunks",
                    self.inner.name(),
                    computed.len(),
                    misses.len()
                )));
            }

            let mut cache = self.cache.lock();
            for ((position, chunk), vector) in miss_positions.into_iter().zip(misses).zip(computed) {
                cache.put((model.to_string(), chunk), vector.clone());
                slots[position] = Some(vector);
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.ok_or_else(|| ScoreError::InferenceFailure("embedding missing after cache fill".to_string())))
            .collect()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
