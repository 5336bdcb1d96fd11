pub mod config;
pub mod document;
pub mod error;
pub mod providers;
pub mod scoring;
pub mod text;

// Re-export commonly used items
pub use config::{ProviderKind, ScorerConfig};
pub use document::{PdfExtractor, TextExtractor};
pub use error::{Result, ScoreError};
pub use providers::{create_provider, EmbeddingProvider};
pub use scoring::{ChunkedDocument, PreparedDocument, ScoreResult, Scorer};
