pub mod chunker;
pub mod normalizer;

pub use chunker::{chunk, DEFAULT_CHUNK_SIZE};
pub use normalizer::normalize;
