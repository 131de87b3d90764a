//! Score selection and report formatting for classification output.
//!
//! Two selection policies are supported as named operations: a thresholded
//! best-match selector and a full per-class report. The caller chooses; the
//! pipeline's display surface uses the full report.

use crate::core::constants::{DEFAULT_CONFIDENCE_THRESHOLD, SCORE_DECIMALS};
use crate::core::errors::ClassifyError;
use crate::labels::LabelTable;
use serde::{Deserialize, Serialize};

/// A single classification prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPrediction {
    /// Class index (0-based, in label-table order).
    pub index: usize,
    /// Confidence score. Higher means more likely; not guaranteed to be a
    /// normalized probability.
    pub score: f32,
    /// Human-readable class name.
    pub name: String,
}

/// One line of a classification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// Class name.
    pub name: String,
    /// Raw confidence score.
    pub score: f32,
}

/// A full per-class classification report, in label-table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    entries: Vec<ScoredLabel>,
}

impl ClassReport {
    /// Returns the report entries in label-table order.
    pub fn entries(&self) -> &[ScoredLabel] {
        &self.entries
    }

    /// Returns the number of classes in the report.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the report holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Formats the report as a multi-line string, one line per class:
    /// `"<name>: <score to 8 decimal places>"`, newline-terminated.
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "{}: {:.prec$}\n",
                entry.name,
                entry.score,
                prec = SCORE_DECIMALS
            ));
        }
        out
    }
}

/// Returns the index of the maximum score among scores at or above the
/// threshold, or None when no score meets it.
///
/// Ties at the maximum resolve to the smallest index: the scan is stable
/// ascending and a later score must be strictly greater to win.
pub fn select_best_above_threshold(scores: &[f32], threshold: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score >= threshold {
            let better = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if better {
                best = Some((index, score));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Returns the k highest-scored class indexes with their scores, in
/// descending score order.
///
/// Asking for more entries than there are classes returns them all.
pub fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut indexed: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.truncate(k);
    indexed
}

/// Applies the selection policies against a label table.
///
/// Both operations check the `scores.len() == labels.len()` invariant and
/// fail with [`ClassifyError::SchemaMismatch`] when it does not hold; no
/// silent truncation or padding.
#[derive(Debug, Clone)]
pub struct ScoreSelector {
    /// Confidence threshold for best-match selection.
    threshold: f32,
}

impl Default for ScoreSelector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ScoreSelector {
    /// Creates a selector with the given confidence threshold.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Returns the configured confidence threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    fn ensure_schema(scores: &[f32], labels: &LabelTable) -> Result<(), ClassifyError> {
        if scores.len() != labels.len() {
            return Err(ClassifyError::schema_mismatch(labels.len(), scores.len()));
        }
        Ok(())
    }

    /// Thresholded best-match policy.
    ///
    /// Returns the named prediction for the best score at or above the
    /// threshold, or `Ok(None)` when nothing meets it (not an error).
    pub fn best_match(
        &self,
        scores: &[f32],
        labels: &LabelTable,
    ) -> Result<Option<ClassPrediction>, ClassifyError> {
        Self::ensure_schema(scores, labels)?;

        match select_best_above_threshold(scores, self.threshold) {
            Some(index) => {
                let name = labels.name_at(index)?.to_string();
                Ok(Some(ClassPrediction {
                    index,
                    score: scores[index],
                    name,
                }))
            }
            None => Ok(None),
        }
    }

    /// Full-report policy.
    ///
    /// Pairs every score with its label by index, no thresholding, no
    /// sorting.
    pub fn format_report(
        &self,
        scores: &[f32],
        labels: &LabelTable,
    ) -> Result<ClassReport, ClassifyError> {
        Self::ensure_schema(scores, labels)?;

        let entries = labels
            .iter()
            .zip(scores.iter())
            .map(|(name, &score)| ScoredLabel {
                name: name.to_string(),
                score,
            })
            .collect();
        Ok(ClassReport { entries })
    }
}
