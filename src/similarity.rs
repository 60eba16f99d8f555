//! Fuzzy text matching shared by label derivation and evaluation.
//!
//! Training labels and evaluation matches both accept a candidate at the same
//! similarity bound, [`MATCH_THRESHOLD`]. Keeping the two flows on one
//! constant keeps a model's own labeling consistent with how it is scored.

use std::collections::HashSet;

use crate::model::{Heading, HeadingLevel};

/// Minimum similarity for a line to count as matching a ground-truth heading.
pub const MATCH_THRESHOLD: f32 = 0.7;

/// Similarity of two text fragments in `[0, 1]`.
///
/// Case-insensitive and trimmed. Exact match scores 1.0, a substring
/// relationship 0.8, otherwise the Jaccard overlap of whitespace-tokenized
/// word sets. Two fragments with no tokens at all score 0.0, not 1.0, so
/// degenerate blank lines never match anything.
pub fn text_similarity(a: &str, b: &str) -> f32 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b && !a.is_empty() {
        return 1.0;
    }

    if !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a)) {
        return 0.8;
    }

    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let overlap = words_a.intersection(&words_b).count();
    overlap as f32 / union as f32
}

/// Find the ground-truth heading most similar to `text`.
///
/// Linear scan keeping the strictly highest score; ties keep the first
/// heading encountered. An empty ground-truth list yields the default level
/// with a score of 0.0.
pub fn find_best_match(text: &str, expected: &[Heading]) -> (HeadingLevel, f32) {
    let mut best_level = HeadingLevel::DEFAULT;
    let mut best_score = 0.0;

    for heading in expected {
        let score = text_similarity(text, &heading.text);
        if score > best_score {
            best_score = score;
            best_level = heading.level;
        }
    }

    (best_level, best_score)
}
