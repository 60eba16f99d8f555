//! Outline evaluation against ground truth.
//!
//! Predicted headings are matched one-to-one to expected headings by fuzzy
//! text similarity, then scored with precision, recall, F1, and hierarchy
//! accuracy. The match-acceptance bound is the same threshold used to derive
//! training labels.

use crate::model::Heading;
use crate::similarity::{text_similarity, MATCH_THRESHOLD};

/// Scores for one document's predicted outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineMetrics {
    /// Fraction of predicted headings that matched
    pub precision: f64,
    /// Fraction of expected headings that were found
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// Fraction of matched headings with the correct level
    pub hierarchy_accuracy: f64,
    /// Number of matched heading pairs
    pub true_positives: usize,
    /// Number of expected headings
    pub expected_count: usize,
    /// Number of predicted headings
    pub predicted_count: usize,
}

/// Score a predicted outline against the expected one.
///
/// Matching is greedy and one-to-one: predicted headings are visited in
/// order, each consuming the unmatched expected heading with the highest
/// similarity at or above the acceptance threshold (ties keep the first
/// encountered). All degenerate denominators score 0.0: an empty expected
/// outline zeroes recall (and with it F1), so callers evaluating a corpus
/// should filter out documents without ground truth upstream.
pub fn evaluate_outline(expected: &[Heading], predicted: &[Heading]) -> OutlineMetrics {
    let mut matched_expected = vec![false; expected.len()];
    let mut true_positives = 0usize;
    let mut correct_hierarchy = 0usize;

    for pred in predicted {
        let mut best_idx = None;
        let mut best_similarity = 0.0f32;

        for (idx, exp) in expected.iter().enumerate() {
            if matched_expected[idx] {
                continue;
            }
            let similarity = text_similarity(&pred.text, &exp.text);
            if similarity > best_similarity && similarity >= MATCH_THRESHOLD {
                best_similarity = similarity;
                best_idx = Some(idx);
            }
        }

        if let Some(idx) = best_idx {
            matched_expected[idx] = true;
            true_positives += 1;
            if pred.level == expected[idx].level {
                correct_hierarchy += 1;
            }
        }
    }

    let precision = ratio(true_positives, predicted.len());
    let recall = ratio(true_positives, expected.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    let hierarchy_accuracy = ratio(correct_hierarchy, true_positives);

    OutlineMetrics {
        precision,
        recall,
        f1,
        hierarchy_accuracy,
        true_positives,
        expected_count: expected.len(),
        predicted_count: predicted.len(),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Corpus-level averages over per-document metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationSummary {
    /// Mean precision across documents
    pub precision: f64,
    /// Mean recall across documents
    pub recall: f64,
    /// Mean F1 across documents
    pub f1: f64,
    /// Mean hierarchy accuracy across documents
    pub hierarchy_accuracy: f64,
    /// Number of documents evaluated
    pub documents: usize,
}

/// Aggregate per-document metrics by simple arithmetic means.
pub fn summarize(metrics: &[OutlineMetrics]) -> EvaluationSummary {
    let n = metrics.len();
    if n == 0 {
        return EvaluationSummary {
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            hierarchy_accuracy: 0.0,
            documents: 0,
        };
    }

    let mean = |f: fn(&OutlineMetrics) -> f64| metrics.iter().map(f).sum::<f64>() / n as f64;

    EvaluationSummary {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        hierarchy_accuracy: mean(|m| m.hierarchy_accuracy),
        documents: n,
    }
}
