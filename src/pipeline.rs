//! The per-document outline pipeline and the batch driver helper.
//!
//! One document flows: word source → line grouping → document statistics →
//! per-line classification → margin suppression and thresholding → final
//! [`DocumentStructure`]. Documents are independent; the batch helper runs
//! them in parallel against one shared immutable model.

use rayon::prelude::*;

use crate::classify::{TrainedModel, MIN_TEXT_LEN};
use crate::error::{Error, Result};
use crate::features::{self, DocumentContext};
use crate::layout;
use crate::margin;
use crate::model::{DocumentStructure, Heading, HeadingLevel, HeadingPrediction, Line};
use crate::source::WordSource;
use crate::title;

/// Minimum classifier confidence for a heading to enter the outline.
pub const CONFIDENCE_THRESHOLD: f32 = 0.3;

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Confidence a prediction must exceed to be emitted
    pub confidence_threshold: f32,

    /// Number of leading pages scanned for the title
    pub title_page_budget: usize,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the title page budget.
    pub fn with_title_page_budget(mut self, pages: usize) -> Self {
        self.title_page_budget = pages;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
            title_page_budget: title::TITLE_PAGE_BUDGET,
        }
    }
}

/// Extract the outline structure of one document.
///
/// With no model available the prediction stage short-circuits: the result
/// carries the selected title and an empty outline. Failures are explicit:
/// an unreadable source propagates [`Error::Extraction`] and a document with
/// no text lines yields [`Error::EmptyDocument`]; the batch driver decides
/// the degradation policy.
pub fn extract_structure<S: WordSource + ?Sized>(
    source: &S,
    model: Option<&TrainedModel>,
    options: &OutlineOptions,
) -> Result<DocumentStructure> {
    let pages = source.pages()?;
    let lines = layout::group_pages(&pages);
    if lines.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let title = title::select_title(&pages, options.title_page_budget);

    let Some(model) = model else {
        log::debug!("No trained model; emitting title-only structure");
        return Ok(DocumentStructure::title_only(title));
    };

    let context = DocumentContext::from_pages(&pages, &lines);
    let suppressed = margin::recurring_margin_text(&pages);
    let predictions = predict_lines(&lines, &context, model);

    let outline = build_outline(&lines, &predictions, &suppressed, options.confidence_threshold);

    Ok(DocumentStructure { title, outline })
}

/// Run the classifier over every line of a document.
///
/// Lines shorter than 3 trimmed characters are never headings and skip the
/// model entirely.
pub fn predict_lines(
    lines: &[Line],
    context: &DocumentContext,
    model: &TrainedModel,
) -> Vec<HeadingPrediction> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            if line.trimmed().chars().count() < MIN_TEXT_LEN {
                HeadingPrediction::negative()
            } else {
                model.predict(&features::extract(lines, idx, context))
            }
        })
        .collect()
}

/// Assemble the final heading list from per-line predictions.
///
/// A line is emitted when its prediction is positive, its confidence exceeds
/// the threshold, its text is not suppressed margin content, and its trimmed
/// text is longer than 2 characters. The level defaults to H3 when the
/// prediction carries none. Input order is preserved.
fn build_outline(
    lines: &[Line],
    predictions: &[HeadingPrediction],
    suppressed: &std::collections::HashSet<String>,
    confidence_threshold: f32,
) -> Vec<Heading> {
    lines
        .iter()
        .zip(predictions)
        .filter_map(|(line, prediction)| {
            let text = line.trimmed();
            let keep = prediction.is_heading
                && prediction.confidence > confidence_threshold
                && !suppressed.contains(text)
                && text.chars().count() > 2;

            keep.then(|| {
                Heading::new(
                    prediction.level.unwrap_or(HeadingLevel::DEFAULT),
                    text,
                    line.page_number,
                )
            })
        })
        .collect()
}

/// Process a batch of documents in parallel against one shared model.
///
/// Per-document failures never abort the batch: they are logged and degrade
/// to a placeholder structure with an empty outline.
pub fn extract_structure_batch<S: WordSource + Sync>(
    sources: &[S],
    model: Option<&TrainedModel>,
    options: &OutlineOptions,
) -> Vec<DocumentStructure> {
    sources
        .par_iter()
        .enumerate()
        .map(|(idx, source)| match extract_structure(source, model, options) {
            Ok(structure) => structure,
            Err(err) => {
                log::warn!("Document {} degraded to placeholder: {}", idx, err);
                DocumentStructure::placeholder()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageWords;
    use crate::source::{FailingSource, InMemorySource};
    use std::collections::HashSet;

    fn line(text: &str, page: u32) -> Line {
        Line {
            text: text.to_string(),
            size: 12.0,
            page_number: page,
            fontname: "Helvetica".to_string(),
            is_bold: false,
            is_italic: false,
            x0: 72.0,
            top: 100.0,
        }
    }

    fn prediction(is_heading: bool, confidence: f32, level: Option<HeadingLevel>) -> HeadingPrediction {
        HeadingPrediction {
            is_heading,
            confidence,
            level,
        }
    }

    #[test]
    fn test_outline_threshold_and_suppression() {
        let lines = vec![
            line("Low confidence heading", 1),
            line("Confidential Draft", 1),
            line("Ch 1", 2),
            line("ab", 2),
        ];
        let mut suppressed = HashSet::new();
        suppressed.insert("Confidential Draft".to_string());

        let predictions = vec![
            prediction(true, 0.25, Some(HeadingLevel::H1)), // below threshold
            prediction(true, 0.35, Some(HeadingLevel::H2)), // suppressed
            prediction(true, 0.5, None),                    // kept, default level
            prediction(true, 0.9, Some(HeadingLevel::H1)),  // too short
        ];

        let outline = build_outline(&lines, &predictions, &suppressed, CONFIDENCE_THRESHOLD);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline[0].text, "Ch 1");
        assert_eq!(outline[0].level, HeadingLevel::H3);
        assert_eq!(outline[0].page, 2);
    }

    #[test]
    fn test_outline_preserves_order() {
        let lines = vec![line("First", 1), line("Second", 2), line("Third", 3)];
        let predictions = vec![
            prediction(true, 0.9, Some(HeadingLevel::H1)),
            prediction(true, 0.9, Some(HeadingLevel::H2)),
            prediction(true, 0.9, Some(HeadingLevel::H3)),
        ];
        let outline = build_outline(&lines, &predictions, &HashSet::new(), CONFIDENCE_THRESHOLD);
        let texts: Vec<_> = outline.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_empty_document_is_explicit() {
        let source = InMemorySource::new(vec![PageWords::new(1, 800.0, vec![])]);
        let result = extract_structure(&source, None, &OutlineOptions::default());
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_no_model_yields_title_only() {
        use crate::model::Word;
        let source = InMemorySource::new(vec![PageWords::new(
            1,
            800.0,
            vec![Word::new("Report", 72.0, 150.0, 80.0, 24.0, "Helvetica-Bold", 1)],
        )]);
        let structure = extract_structure(&source, None, &OutlineOptions::default()).unwrap();
        assert_eq!(structure.title, "Report");
        assert!(structure.outline.is_empty());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let sources = vec![FailingSource::new("broken"), FailingSource::new("also broken")];
        let results = extract_structure_batch(&sources, None, &OutlineOptions::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], DocumentStructure::placeholder());
    }

    #[test]
    fn test_options_builder() {
        let options = OutlineOptions::new()
            .with_confidence_threshold(0.5)
            .with_title_page_budget(1);
        assert_eq!(options.confidence_threshold, 0.5);
        assert_eq!(options.title_page_budget, 1);
    }
}
