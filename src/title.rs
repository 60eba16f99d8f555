//! Title selection by maximum font size.

use crate::layout;
use crate::model::{DocumentStructure, PageWords};

/// Number of leading pages scanned for the title.
pub const TITLE_PAGE_BUDGET: usize = 2;

/// Pick the document title from the largest-font lines of the leading pages.
///
/// Scans at most `max_pages` pages, tracking the maximum line font size seen
/// so far. Whenever a page's maximum exceeds the running maximum, the title
/// becomes the space-joined text of all that page's lines at that size.
/// Falls back to the default title when no lines exist. The title is not
/// subject to the heading classifier or the margin filter.
pub fn select_title(pages: &[PageWords], max_pages: usize) -> String {
    let mut title = DocumentStructure::FALLBACK_TITLE.to_string();
    let mut max_font_size = 0.0f32;

    for page in pages.iter().take(max_pages) {
        let lines = layout::group_words_into_lines(&page.words);
        if lines.is_empty() {
            continue;
        }

        let page_max = lines
            .iter()
            .map(|l| l.size)
            .fold(0.0f32, f32::max);

        if page_max > max_font_size {
            max_font_size = page_max;
            title = lines
                .iter()
                .filter(|l| l.size == page_max)
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;

    fn page(number: u32, lines: &[(&str, f32, f32)]) -> PageWords {
        let words = lines
            .iter()
            .map(|(text, size, top)| Word::new(*text, 72.0, 200.0, *top, *size, "Helvetica", number))
            .collect();
        PageWords::new(number, 800.0, words)
    }

    #[test]
    fn test_fallback_title() {
        assert_eq!(select_title(&[], TITLE_PAGE_BUDGET), "Untitled Document");

        let empty_page = PageWords::new(1, 800.0, vec![]);
        assert_eq!(
            select_title(&[empty_page], TITLE_PAGE_BUDGET),
            "Untitled Document"
        );
    }

    #[test]
    fn test_largest_font_wins() {
        let pages = vec![page(
            1,
            &[("Annual Report", 24.0, 100.0), ("Prepared by Finance", 12.0, 140.0)],
        )];
        assert_eq!(select_title(&pages, TITLE_PAGE_BUDGET), "Annual Report");
    }

    #[test]
    fn test_multiple_max_lines_joined() {
        let pages = vec![page(
            1,
            &[
                ("Annual Report", 24.0, 100.0),
                ("Fiscal Year 2024", 24.0, 130.0),
                ("Summary", 12.0, 170.0),
            ],
        )];
        assert_eq!(
            select_title(&pages, TITLE_PAGE_BUDGET),
            "Annual Report Fiscal Year 2024"
        );
    }

    #[test]
    fn test_second_page_can_replace_title() {
        let pages = vec![
            page(1, &[("Cover note", 14.0, 100.0)]),
            page(2, &[("The Real Title", 28.0, 100.0)]),
        ];
        assert_eq!(select_title(&pages, TITLE_PAGE_BUDGET), "The Real Title");
    }

    #[test]
    fn test_pages_beyond_budget_ignored() {
        let pages = vec![
            page(1, &[("Title", 20.0, 100.0)]),
            page(2, &[("Subtitle", 14.0, 100.0)]),
            page(3, &[("HUGE LATE TEXT", 40.0, 100.0)]),
        ];
        assert_eq!(select_title(&pages, TITLE_PAGE_BUDGET), "Title");
    }
}
