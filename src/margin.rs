//! Recurring header/footer suppression.
//!
//! Running headers and footers repeat in the top and bottom margin bands of
//! most pages. Text recurring across enough pages is suppressed document-wide
//! so it never reaches the outline.

use std::collections::{HashMap, HashSet};

use crate::layout;
use crate::model::PageWords;

/// Fraction of page height treated as the top/bottom margin band.
pub const MARGIN_BAND: f32 = 0.15;

/// Fraction of pages a text must recur on to be suppressed.
pub const RECURRENCE_THRESHOLD: f32 = 0.3;

/// Documents shorter than this give no evidence to distinguish boilerplate
/// from content, so nothing is suppressed.
const MIN_PAGES: usize = 3;

/// Identify recurring margin text across a document's pages.
///
/// For each page, words falling within the top or bottom [`MARGIN_BAND`] of
/// the page height are grouped into lines; each distinct trimmed text longer
/// than 2 characters is counted once per page it appears on (case-sensitive
/// exact match). Texts recurring on at least [`RECURRENCE_THRESHOLD`] of
/// pages are returned. Documents with fewer than 3 pages yield an empty set.
pub fn recurring_margin_text(pages: &[PageWords]) -> HashSet<String> {
    if pages.len() < MIN_PAGES {
        return HashSet::new();
    }

    let mut counts: HashMap<String, usize> = HashMap::new();

    for page in pages {
        let header_boundary = page.height * MARGIN_BAND;
        let footer_boundary = page.height * (1.0 - MARGIN_BAND);

        let margin_words: Vec<_> = page
            .words
            .iter()
            .filter(|w| w.top < header_boundary || w.top > footer_boundary)
            .cloned()
            .collect();
        if margin_words.is_empty() {
            continue;
        }

        let mut seen_on_page = HashSet::new();
        for line in layout::group_words_into_lines(&margin_words) {
            let text = line.trimmed();
            if text.chars().count() > 2 {
                seen_on_page.insert(text.to_string());
            }
        }
        for text in seen_on_page {
            *counts.entry(text).or_insert(0) += 1;
        }
    }

    let page_count = pages.len() as f32;
    counts
        .into_iter()
        .filter(|(_, count)| *count as f32 / page_count >= RECURRENCE_THRESHOLD)
        .map(|(text, _)| text)
        .collect()
}
