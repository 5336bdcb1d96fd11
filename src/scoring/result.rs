use serde::{Serialize, Serializer};

pub const OUTPUT_DECIMALS: usize = 3;

/// Rounds to the nearest value with `OUTPUT_DECIMALS` decimals, working on the
/// exact binary value so halfway cases like 0.0625 round to even.
pub fn round_score(value: f64) -> f64 {
    format!("{:.*}", OUTPUT_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_score(*value))
}

fn serialize_rounded_seq<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| round_score(*v)))
}

/// Outcome of one RFP/bid comparison.
///
/// Values are kept at full precision; rounding happens only when the
/// result is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    #[serde(serialize_with = "serialize_rounded")]
    pub compatibility_score: f64,
    #[serde(serialize_with = "serialize_rounded_seq")]
    pub per_chunk_scores: Vec<f64>,
}

impl ScoreResult {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
