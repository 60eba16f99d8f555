//! Per-line feature extraction for heading classification.
//!
//! Each line is summarized as a fixed-order vector of [`FEATURE_COUNT`]
//! numeric features covering typography, text shape, page position, and the
//! immediate line context. The order is part of the trained-model contract:
//! any reordering invalidates previously trained models.

use crate::model::{Line, PageWords};

/// Number of features per line. Fixed by the model contract.
pub const FEATURE_COUNT: usize = 18;

/// A fixed-order feature vector for one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f32; FEATURE_COUNT]);

impl FeatureVector {
    /// The features as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f32;

    fn index(&self, idx: usize) -> &f32 {
        &self.0[idx]
    }
}

/// Document-wide statistics shared by every feature extraction call.
///
/// Built once per document. The sorted size array replaces a per-line rescan
/// for the percentile feature with a binary search; results are identical.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Mean font size across all words in the document
    pub avg_font_size: f32,
    /// Page height, taken from the first page
    pub page_height: f32,
    sorted_sizes: Vec<f32>,
}

/// Font size used when a document contains no words at all.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Page height used when a document contains no pages.
const DEFAULT_PAGE_HEIGHT: f32 = 800.0;

impl DocumentContext {
    /// Build a context from explicit statistics and the document's line list.
    pub fn new(lines: &[Line], avg_font_size: f32, page_height: f32) -> Self {
        let mut sorted_sizes: Vec<f32> = lines.iter().map(|l| l.size).collect();
        sorted_sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            avg_font_size,
            page_height,
            sorted_sizes,
        }
    }

    /// Build a context from extracted pages and their grouped lines.
    ///
    /// The average font size is the mean over word sizes; the page height comes
    /// from the first page. Empty documents fall back to nominal defaults.
    pub fn from_pages(pages: &[PageWords], lines: &[Line]) -> Self {
        let mut size_sum = 0.0f64;
        let mut word_count = 0usize;
        for page in pages {
            for word in &page.words {
                size_sum += word.size as f64;
                word_count += 1;
            }
        }
        let avg_font_size = if word_count > 0 {
            (size_sum / word_count as f64) as f32
        } else {
            DEFAULT_FONT_SIZE
        };
        let page_height = pages.first().map_or(DEFAULT_PAGE_HEIGHT, |p| p.height);

        Self::new(lines, avg_font_size, page_height)
    }

    /// Fraction of lines with a strictly smaller font size.
    ///
    /// Returns 0.5 for a document with no lines.
    pub fn font_size_percentile(&self, size: f32) -> f32 {
        if self.sorted_sizes.is_empty() {
            return 0.5;
        }
        let smaller = self.sorted_sizes.partition_point(|&s| s < size);
        smaller as f32 / self.sorted_sizes.len() as f32
    }
}

/// Extract the feature vector for the line at `idx` within `lines`.
pub fn extract(lines: &[Line], idx: usize, ctx: &DocumentContext) -> FeatureVector {
    let line = &lines[idx];
    let text = line.trimmed();
    let font_size = line.size;

    let font_size_ratio = if ctx.avg_font_size > 0.0 {
        font_size / ctx.avg_font_size
    } else {
        1.0
    };
    let text_length = text.chars().count();
    let word_count = text.split_whitespace().count();

    let ends_with_colon = text.ends_with(':');
    let title_case = is_title_case(text);
    let uppercase = is_upper(text) && text_length > 2;
    let starts_with_number = text.chars().next().is_some_and(|c| c.is_ascii_digit());
    let contains_appendix = text.to_lowercase().contains("appendix");

    let position_y = if ctx.page_height > 0.0 {
        line.top / ctx.page_height
    } else {
        0.0
    };

    let mut prev_ratio = 1.0;
    let mut spacing_above = 0.0;
    if idx > 0 {
        let prev = &lines[idx - 1];
        if prev.size > 0.0 {
            prev_ratio = font_size / prev.size;
        }
        spacing_above = (line.top - prev.top).abs();
    }

    let mut next_ratio = 1.0;
    let mut spacing_below = 0.0;
    if idx + 1 < lines.len() {
        let next = &lines[idx + 1];
        if next.size > 0.0 {
            next_ratio = font_size / next.size;
        }
        spacing_below = (next.top - line.top).abs();
    }

    let has_punctuation = text.chars().any(|c| ".,;!?()[]{}".contains(c));
    let is_short_line = text_length < 80;

    FeatureVector([
        font_size_ratio,
        text_length as f32,
        word_count as f32,
        ends_with_colon as u8 as f32,
        title_case as u8 as f32,
        uppercase as u8 as f32,
        starts_with_number as u8 as f32,
        contains_appendix as u8 as f32,
        line.is_bold as u8 as f32,
        line.is_italic as u8 as f32,
        position_y,
        next_ratio,
        prev_ratio,
        spacing_above,
        spacing_below,
        has_punctuation as u8 as f32,
        is_short_line as u8 as f32,
        ctx.font_size_percentile(font_size),
    ])
}

/// Per-word capitalization check: every cased run starts uppercase and
/// continues lowercase.
fn is_title_case(text: &str) -> bool {
    let mut has_cased = false;
    let mut prev_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            has_cased = true;
            prev_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            has_cased = true;
            prev_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

/// All cased characters are uppercase, and at least one exists.
fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
