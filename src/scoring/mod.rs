pub mod matcher;
pub mod pipeline;
pub mod result;

pub use matcher::{compare, cosine_similarity, BestMatch, MatchOutcome, SimilarityMatrix};
pub use pipeline::{ChunkedDocument, PreparedDocument, Scorer};
pub use result::ScoreResult;
