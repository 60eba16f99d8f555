//! Line reconstruction from positioned word tokens.
//!
//! Words arrive from the extraction engine as individual tokens with page
//! coordinates. This module clusters them back into visually distinct rows
//! using fixed geometric tolerances, producing [`Line`] values in reading
//! order (ascending vertical position, then horizontal position).

use crate::model::line::{font_is_bold, font_is_italic};
use crate::model::{Line, Word};

/// Maximum vertical distance between words on the same line.
pub const LINE_TOLERANCE: f32 = 2.0;

/// Minimum horizontal gap that separates two words with a space.
///
/// Adjacent glyph runs split into separate tokens by the extractor are joined
/// without a space when the gap stays under this tolerance.
pub const CHAR_TOLERANCE: f32 = 1.5;

/// Cluster words into lines.
///
/// Words are sorted by `(top, x0)` and split into rows wherever the vertical
/// distance to the previous word exceeds [`LINE_TOLERANCE`]. Intended to be
/// called with the words of a single page; callers concatenate per-page results
/// to obtain document reading order.
pub fn group_words_into_lines(words: &[Word]) -> Vec<Line> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| {
        (a.top, a.x0)
            .partial_cmp(&(b.top, b.x0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut lines = Vec::new();
    let mut current: Vec<&Word> = vec![sorted[0]];

    for &word in &sorted[1..] {
        let last = current[current.len() - 1];
        if (word.top - last.top).abs() > LINE_TOLERANCE {
            lines.push(build_line(&current));
            current = vec![word];
        } else {
            current.push(word);
        }
    }
    lines.push(build_line(&current));

    lines
}

/// Group every page of a document, concatenated in page order.
///
/// The result is the document's full line sequence in reading order:
/// ascending page, then vertical, then horizontal position.
pub fn group_pages(pages: &[crate::model::PageWords]) -> Vec<Line> {
    pages
        .iter()
        .flat_map(|page| group_words_into_lines(&page.words))
        .collect()
}

/// Build a single line from a run of words already known to share a row.
///
/// Attributes come from the first word. A space is inserted between
/// consecutive words only when the horizontal gap exceeds [`CHAR_TOLERANCE`].
fn build_line(words: &[&Word]) -> Line {
    let first = words[0];

    let mut text = first.text.clone();
    for pair in words.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if curr.x0 - prev.x1 > CHAR_TOLERANCE {
            text.push(' ');
        }
        text.push_str(&curr.text);
    }

    Line {
        text,
        size: first.size,
        page_number: first.page_number,
        fontname: first.fontname.clone(),
        is_bold: font_is_bold(&first.fontname),
        is_italic: font_is_italic(&first.fontname),
        x0: first.x0,
        top: first.top,
    }
}
