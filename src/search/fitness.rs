//! Fitness scoring of a produced sequence against the target prefix.

use rkyv::{Archive, Deserialize, Serialize};

/// Score of an output that is shorter than the target.
pub const WORST_SCORE: u32 = u32::MAX;

/// Per-position distance between a target value and a produced value.
#[derive(Archive, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[rkyv(derive(Debug))]
pub enum Metric {
    /// `|t - p|` over the integers.
    #[default]
    Absolute,
    /// Distance around the 16-bit ring: `min(t - p, p - t)`, wrapping.
    Circular,
}

impl Metric {
    pub fn distance(self, target: u16, produced: u16) -> u32 {
        match self {
            Metric::Absolute => u32::from(target.abs_diff(produced)),
            Metric::Circular => {
                u32::from(target.wrapping_sub(produced).min(produced.wrapping_sub(target)))
            }
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "absolute" => Ok(Metric::Absolute),
            "circular" => Ok(Metric::Circular),
            other => Err(format!(
                "unknown metric '{}' (expected 'absolute' or 'circular')",
                other
            )),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Absolute => write!(f, "absolute"),
            Metric::Circular => write!(f, "circular"),
        }
    }
}

/// Sum of absolute differences over the target's length. Lower is better;
/// 0 is an exact prefix match.
pub fn score(target: &[u16], produced: &[u16]) -> u32 {
    score_with(Metric::Absolute, target, produced)
}

/// Score under `metric`. Outputs shorter than the target get
/// [`WORST_SCORE`]; sums saturate there instead of wrapping.
pub fn score_with(metric: Metric, target: &[u16], produced: &[u16]) -> u32 {
    if produced.len() < target.len() {
        return WORST_SCORE;
    }
    target
        .iter()
        .zip(produced)
        .fold(0u32, |sum, (&t, &p)| sum.saturating_add(metric.distance(t, p)))
}
