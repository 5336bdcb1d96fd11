use crate::config::ScorerConfig;
use crate::document::TextExtractor;
use crate::error::{Result, ScoreError};
use crate::providers::traits::EmbeddingProvider;
use crate::scoring::matcher;
use crate::scoring::result::ScoreResult;
use crate::text::{chunk, normalize};
use log::info;
use std::path::Path;
use std::sync::Arc;
use tokio::time::timeout;

/// A document that has been extracted, normalized and chunked, not yet embedded.
#[derive(Debug, Clone)]
pub struct ChunkedDocument {
    pub label: String,
    pub chunks: Vec<String>,
}

/// A document that has been extracted, chunked and embedded.
///
/// Read-only once built, so one prepared RFP can be compared against any
/// number of bids.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    pub label: String,
    pub chunks: Vec<String>,
    pub vectors: Vec<Vec<f32>>,
}

impl PreparedDocument {
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn dimension(&self) -> usize {
        self.vectors.first().map(Vec::len).unwrap_or(0)
    }
}

/// Runs extract, normalize, chunk, embed and match for an RFP/bid pair.
///
/// Both documents are read and chunked before the embedder is called, so a
/// bad bid is reported as such without spending inference on the RFP.
pub struct Scorer {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    config: ScorerConfig,
}

impl Scorer {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: ScorerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor,
            embedder,
            config,
        })
    }

    /// Extracts, normalizes and chunks the document at `path`.
    pub fn chunk_document(&self, label: &str, path: &Path) -> Result<ChunkedDocument> {
        let raw = self.extractor.extract(path)?;
        self.chunk_text(&format!("{} ({})", label, path.display()), &raw)
    }

    /// Normalizes and chunks already extracted text.
    pub fn chunk_text(&self, label: &str, raw: &str) -> Result<ChunkedDocument> {
        let normalized = normalize(raw);

        // page separators alone are not extractable text
        if normalized.trim().is_empty() {
            return Err(ScoreError::EmptyInput(label.to_string()));
        }

        let chunks: Vec<String> = chunk(&normalized, self.config.chunk_size)?
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            "{}: {} characters in {} chunks",
            label,
            normalized.chars().count(),
            chunks.len()
        );

        Ok(ChunkedDocument {
            label: label.to_string(),
            chunks,
        })
    }

    /// Embeds a chunked document with one call to the embedding provider.
    pub async fn embed_document(&self, document: ChunkedDocument) -> Result<PreparedDocument> {
        let ChunkedDocument { label, chunks } = document;

        info!(
            "{}: embedding {} chunks with {} model {}",
            label,
            chunks.len(),
            self.embedder.name(),
            self.config.model
        );

        let vectors = timeout(self.config.embed_timeout, self.embedder.embed(&chunks, &self.config.model))
            .await
            .map_err(|_| ScoreError::InferenceFailure(format!(
                "embedding {} timed out after {:?}",
                label, self.config.embed_timeout
            )))??;

        if vectors.len() != chunks.len() {
            return Err(ScoreError::InferenceFailure(format!(
                "{} returned {} embeddings for {} chunks of {}",
                self.embedder.name(),
                vectors.len(),
                chunks.len(),
                label
            )));
        }

        Ok(PreparedDocument {
            label,
            chunks,
            vectors,
        })
    }

    /// Extracts and embeds the document at `path`.
    pub async fn prepare(&self, label: &str, path: &Path) -> Result<PreparedDocument> {
        let document = self.chunk_document(label, path)?;
        self.embed_document(document).await
    }

    /// Normalizes, chunks and embeds already extracted text.
    pub async fn prepare_text(&self, label: &str, raw: &str) -> Result<PreparedDocument> {
        let document = self.chunk_text(label, raw)?;
        self.embed_document(document).await
    }

    /// Compares two prepared documents.
    pub fn score_prepared(&self, rfp: &PreparedDocument, bid: &PreparedDocument) -> Result<ScoreResult> {
        let outcome = matcher::compare(&rfp.vectors, &bid.vectors)?;

        info!(
            "{} vs {}: compatibility {:.4} over {} rfp chunks",
            rfp.label,
            bid.label,
            outcome.overall,
            rfp.chunk_count()
        );

        Ok(ScoreResult {
            compatibility_score: outcome.overall,
            per_chunk_scores: outcome.per_chunk_scores(),
        })
    }

    async fn score_chunked(&self, rfp: ChunkedDocument, bid: ChunkedDocument) -> Result<ScoreResult> {
        let rfp = self.embed_document(rfp).await?;
        let bid = self.embed_document(bid).await?;
        self.score_prepared(&rfp, &bid)
    }

    /// Scores how well the bid at `bid` addresses the RFP at `rfp`.
    pub async fn score(&self, rfp: &Path, bid: &Path) -> Result<ScoreResult> {
        let rfp = self.chunk_document("rfp", rfp)?;
        let bid = self.chunk_document("bid", bid)?;
        self.score_chunked(rfp, bid).await
    }

    pub async fn score_texts(&self, rfp: &str, bid: &str) -> Result<ScoreResult> {
        let rfp = self.chunk_text("rfp", rfp)?;
        let bid = self.chunk_text("bid", bid)?;
        self.score_chunked(rfp, bid).await
    }
}
