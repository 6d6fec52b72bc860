//! Row normalisation: one raw CSV record → one canonical [`Edge`].
//!
//! Every default applied to a missing or `nan` field lives here as an explicit
//! branch, so nothing downstream has to guess about absent values.

use disnet_common::{NetworkError, Result};
use serde::Deserialize;

use crate::model::{Edge, INTERPRETABLE_NO};

/// Separator between the disease name and its condition qualifier.
pub const PAIR_SEPARATOR: &str = "--";

/// Separator joining the two sorted endpoint keys of an edge id.
pub const EDGE_ID_SEPARATOR: &str = "__";

/// Raw-text placeholder spreadsheet exports write for empty cells.
const NAN_LITERAL: &str = "nan";

/// One row of the disease-pair CSV.
///
/// All columns are optional at parse time; [`normalize`] decides which
/// absences are errors and which get defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub pair1: Option<String>,
    #[serde(default)]
    pub pair2: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub shared_genes: Option<String>,
    #[serde(default)]
    pub filtered_pathways: Option<String>,
    #[serde(default)]
    pub interpretability_gpt4o: Option<String>,
    #[serde(default)]
    pub reason_gpt4o: Option<String>,
}

/// Display label for a disease-pair key: text before the first `--`,
/// underscores replaced by spaces.
///
/// `"Anxiety_disorder--None"` → `"Anxiety disorder"`. A key without `--`
/// becomes the label in full.
pub fn extract_disease_name(pair: &str) -> Result<String> {
    if pair.is_empty() {
        return Err(NetworkError::malformed(None, "empty disease-pair key"));
    }
    let disease = pair.split(PAIR_SEPARATOR).next().unwrap_or(pair);
    Ok(disease.replace('_', " "))
}

/// Order-independent edge id: both keys sorted, joined with `__`.
pub fn create_edge_id(pair1: &str, pair2: &str) -> String {
    let (first, second) = if pair1 <= pair2 { (pair1, pair2) } else { (pair2, pair1) };
    format!("{first}{EDGE_ID_SEPARATOR}{second}")
}

fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NAN_LITERAL)
}

/// Split a `;`-separated list cell. Missing, empty and `nan` cells yield an
/// empty list; empty items are dropped.
pub fn parse_list_field(raw: Option<&str>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(s) if is_blank(s) => Vec::new(),
        Some(s) => s
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Parse the weight column. Must be a finite, non-negative number.
pub fn parse_weight(raw: Option<&str>, row: Option<usize>) -> Result<f64> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Err(NetworkError::malformed(row, "missing weight")),
        Some(t) => t,
    };
    let weight: f64 = text
        .parse()
        .map_err(|_| NetworkError::malformed(row, format!("weight '{text}' is not a number")))?;

    if !weight.is_finite() {
        return Err(NetworkError::malformed(row, format!("weight '{text}' is not finite")));
    }
    if weight < 0.0 {
        return Err(NetworkError::malformed(row, format!("weight {weight} is negative")));
    }
    Ok(weight)
}

/// Interpretability flag: absent/empty/`nan` → `NO`, anything else kept as
/// read (trimmed).
pub fn parse_interpretability(raw: Option<&str>) -> String {
    match raw {
        None => INTERPRETABLE_NO.to_string(),
        Some(s) if is_blank(s) => INTERPRETABLE_NO.to_string(),
        Some(s) => s.trim().to_string(),
    }
}

/// Free-text reason: absent/`nan` → empty string.
pub fn parse_reason(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !is_blank(s) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Disease-pair keys are trimmed, so `" Asthma--None"` and `"Asthma--None"`
/// name the same node.
fn required_key(raw: Option<&str>, column: &str, row: Option<usize>) -> Result<String> {
    match raw.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(NetworkError::malformed(row, format!("missing {column}"))),
    }
}

/// Normalise one record into an edge. `row` is the 1-based data-row number
/// used in error messages.
pub fn normalize(record: &RawRecord, row: Option<usize>) -> Result<Edge> {
    let source = required_key(record.pair1.as_deref(), "pair1", row)?;
    let target = required_key(record.pair2.as_deref(), "pair2", row)?;
    let weight = parse_weight(record.weight.as_deref(), row)?;

    Ok(Edge {
        id: create_edge_id(&source, &target),
        weight,
        shared_genes: parse_list_field(record.shared_genes.as_deref()),
        filtered_pathways: parse_list_field(record.filtered_pathways.as_deref()),
        interpretable: parse_interpretability(record.interpretability_gpt4o.as_deref()),
        reason_gpt4o: parse_reason(record.reason_gpt4o.as_deref()),
        source,
        target,
    })
}
