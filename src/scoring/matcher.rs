use crate::error::{Result, ScoreError};
use log::{debug, warn};

/// Cosine similarity of two equal-length vectors, accumulated in f64.
///
/// Returns 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Row-major grid of similarities: one row per RFP chunk, one column per bid chunk.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn compute(rfp: &[Vec<f32>], bid: &[Vec<f32>]) -> Result<Self> {
        if rfp.is_empty() {
            return Err(ScoreError::EmptyInput("rfp".to_string()));
        }
        if bid.is_empty() {
            return Err(ScoreError::EmptyInput("bid".to_string()));
        }
        check_vectors(rfp, bid)?;

        let mut cells = Vec::with_capacity(rfp.len() * bid.len());
        for a in rfp {
            for b in bid {
                cells.push(cosine_similarity(a, b));
            }
        }

        Ok(Self {
            rows: rfp.len(),
            cols: bid.len(),
            cells,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Best bid match for every RFP chunk, in RFP order.
    pub fn best_matches(&self) -> Vec<BestMatch> {
        (0..self.rows)
            .map(|i| {
                let mut best = BestMatch { bid_chunk: 0, similarity: self.get(i, 0) };
                for (j, &similarity) in self.row(i).iter().enumerate().skip(1) {
                    if similarity > best.similarity {
                        best = BestMatch { bid_chunk: j, similarity };
                    }
                }
                best
            })
            .collect()
    }
}

fn check_vectors(rfp: &[Vec<f32>], bid: &[Vec<f32>]) -> Result<()> {
    let dimension = rfp[0].len();

    if let Some(v) = rfp.iter().find(|v| v.len() != dimension) {
        return Err(ScoreError::InferenceFailure(format!(
            "rfp embeddings have inconsistent dimensions ({} and {})",
            dimension,
            v.len()
        )));
    }
    if let Some(v) = bid.iter().find(|v| v.len() != dimension) {
        return Err(ScoreError::DimensionMismatch { rfp: dimension, bid: v.len() });
    }
    if rfp.iter().chain(bid).flatten().any(|x| !x.is_finite()) {
        return Err(ScoreError::InferenceFailure("embedding contains non-finite values".to_string()));
    }

    let zero_vectors = rfp.iter().chain(bid).filter(|v| v.iter().all(|&x| x == 0.0)).count();
    if zero_vectors > 0 {
        warn!("{} zero-norm embeddings will score 0.0 against everything", zero_vectors);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    pub bid_chunk: usize,
    pub similarity: f64,
}

/// Full-precision outcome of comparing two vector sets.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub best_matches: Vec<BestMatch>,
    pub overall: f64,
}

impl MatchOutcome {
    pub fn per_chunk_scores(&self) -> Vec<f64> {
        self.best_matches.iter().map(|m| m.similarity).collect()
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Scores how well `bid` covers `rfp`: each RFP vector takes its best
/// similarity to any bid vector and the overall score is the mean of those.
pub fn compare(rfp: &[Vec<f32>], bid: &[Vec<f32>]) -> Result<MatchOutcome> {
    let matrix = SimilarityMatrix::compute(rfp, bid)?;
    let best_matches = matrix.best_matches();

    for (i, m) in best_matches.iter().enumerate() {
        debug!("rfp chunk {} best matches bid chunk {} ({:.4})", i, m.bid_chunk, m.similarity);
    }

    let scores: Vec<f64> = best_matches.iter().map(|m| m.similarity).collect();
    let overall = mean(&scores);

    Ok(MatchOutcome { best_matches, overall })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample_vectors() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![-1.0, 0.5, 2.0],
            vec![0.3, -0.7, 0.1],
            vec![-2.0, 0.0, 0.0],
        ]
    }

    #[test]
    fn test_identical_vectors_score_one() {
        for v in sample_vectors() {
            assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_known_values() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < EPS);
        assert!((cosine_similarity(&[1.0, 0.0], &[-3.0, 0.0]) + 1.0).abs() < EPS);
        let expected = 1.0 / 2f64.sqrt();
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        let zero = vec![0.0; 3];
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_similarity_is_bounded() {
        let vectors = sample_vectors();
        for a in &vectors {
            for b in &vectors {
                let s = cosine_similarity(a, b);
                assert!((-1.0..=1.0).contains(&s), "{} out of range", s);
            }
        }
    }

    #[test]
    fn test_row_max_dominates_row() {
        let vectors = sample_vectors();
        let matrix = SimilarityMatrix::compute(&vectors[..3], &vectors[2..]).unwrap();
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 4);

        let best = matrix.best_matches();
        for (i, m) in best.iter().enumerate() {
            for j in 0..matrix.cols() {
                assert!(m.similarity >= matrix.get(i, j));
            }
            assert_eq!(m.similarity, matrix.get(i, m.bid_chunk));
        }
    }

    #[test]
    fn test_row_max_is_asymmetric() {
        // Bid covers both RFP requirements, but the RFP covers only half the bid.
        let rfp = vec![vec![1.0, 0.0, 0.0]];
        let bid = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];

        let forward = compare(&rfp, &bid).unwrap();
        assert!((forward.overall - 1.0).abs() < EPS);

        let backward = compare(&bid, &rfp).unwrap();
        assert!((backward.overall - 0.5).abs() < EPS);
    }

    #[test]
    fn test_overall_is_mean_of_per_chunk_scores() {
        let vectors = sample_vectors();
        let outcome = compare(&vectors[..4], &vectors[3..]).unwrap();
        let scores = outcome.per_chunk_scores();
        assert_eq!(scores.len(), 4);
        assert_eq!(outcome.overall, mean(&scores));
    }

    #[test]
    fn test_ties_pick_first_bid_chunk() {
        let rfp = vec![vec![1.0, 0.0]];
        let bid = vec![vec![0.0, 1.0], vec![2.0, 0.0], vec![5.0, 0.0]];
        let outcome = compare(&rfp, &bid).unwrap();
        assert_eq!(outcome.best_matches[0].bid_chunk, 1);
    }

    #[test]
    fn test_empty_sides_are_rejected() {
        let v = vec![vec![1.0, 0.0]];
        match compare(&[], &v).unwrap_err() {
            ScoreError::EmptyInput(side) => assert_eq!(side, "rfp"),
            other => panic!("unexpected error: {other}"),
        }
        match compare(&v, &[]).unwrap_err() {
            ScoreError::EmptyInput(side) => assert_eq!(side, "bid"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = compare(&[vec![1.0, 0.0]], &[vec![1.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, ScoreError::DimensionMismatch { rfp: 2, bid: 3 }));
    }

    #[test]
    fn test_non_finite_embeddings_are_rejected() {
        let err = compare(&[vec![f32::NAN, 0.0]], &[vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, ScoreError::InferenceFailure(_)));
    }

    #[test]
    fn test_zero_vector_row_scores_zero() {
        let outcome = compare(&[vec![0.0, 0.0], vec![1.0, 0.0]], &[vec![1.0, 0.0]]).unwrap();
        assert_eq!(outcome.per_chunk_scores()[0], 0.0);
        assert!((outcome.overall - 0.5).abs() < EPS);
    }
}
