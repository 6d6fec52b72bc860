//! Weight distribution and interpretability statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Edge, GraphSnapshot, INTERPRETABLE_NO, INTERPRETABLE_YES};

/// Linear-interpolation percentile over an ascending slice.
///
/// `k = (n-1)·p/100`, `f = ⌊k⌋`, `c = min(f+1, n-1)`,
/// result `v[f] + (v[c] - v[f])·(k - f)`. Empty input → 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let last = sorted.len() - 1;
    let k = last as f64 * p / 100.0;
    let f = (k.floor() as usize).min(last);
    let c = (f + 1).min(last);
    sorted[f] + (sorted[c] - sorted[f]) * (k - f as f64)
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn share(count: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.1}%", count as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightPercentiles {
    #[serde(rename = "25th")]
    pub p25: f64,
    #[serde(rename = "50th")]
    pub p50: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
    #[serde(rename = "90th")]
    pub p90: f64,
}

/// Summary computed once per snapshot build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub weight_range: WeightRange,
    pub weight_mean: f64,
    pub weight_median: f64,
    pub weight_percentiles: WeightPercentiles,
    pub interpretable_count: usize,
    pub uninterpretable_count: usize,
    pub interpretable_percentage: String,
    pub uninterpretable_percentage: String,
    /// Rows whose edge id repeats an earlier row's.
    pub duplicate_edge_ids: usize,
}

impl NetworkStatistics {
    pub fn compute(snapshot: &GraphSnapshot) -> Self {
        let mut stats = Self::from_edges(snapshot.edges());
        stats.total_nodes = snapshot.node_count();
        stats.duplicate_edge_ids = snapshot.duplicate_edge_ids();
        stats
    }

    /// Edge-level figures only; node totals are left at zero.
    pub fn from_edges(edges: &[Edge]) -> Self {
        let mut weights: Vec<f64> = edges.iter().map(|e| e.weight).collect();
        weights.sort_by(f64::total_cmp);

        let yes = edges.iter().filter(|e| e.interpretable == INTERPRETABLE_YES).count();
        let no = edges.iter().filter(|e| e.interpretable == INTERPRETABLE_NO).count();
        let total = edges.len();

        Self {
            total_nodes: 0,
            total_edges: total,
            weight_range: WeightRange {
                min: weights.first().copied().unwrap_or(0.0),
                max: weights.last().copied().unwrap_or(0.0),
            },
            weight_mean: mean(&weights),
            weight_median: percentile(&weights, 50.0),
            weight_percentiles: WeightPercentiles {
                p25: percentile(&weights, 25.0),
                p50: percentile(&weights, 50.0),
                p75: percentile(&weights, 75.0),
                p90: percentile(&weights, 90.0),
            },
            interpretable_count: yes,
            uninterpretable_count: no,
            interpretable_percentage: share(yes, total),
            uninterpretable_percentage: share(no, total),
            duplicate_edge_ids: 0,
        }
    }
}
