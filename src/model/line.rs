//! Reconstructed text lines.

use serde::{Deserialize, Serialize};

/// A visually distinct text row, built once from a contiguous run of words.
///
/// Typography attributes (`size`, `fontname`, `x0`, `top`) come from the first
/// word in the row; `is_bold`/`is_italic` are derived from the font name. Lines
/// are never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Concatenated word text
    pub text: String,
    /// Font size of the first word
    pub size: f32,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Font name of the first word
    pub fontname: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Whether the font appears to be italic
    pub is_italic: bool,
    /// Left edge X coordinate of the first word
    pub x0: f32,
    /// Distance from the top of the page
    pub top: f32,
}

impl Line {
    /// Trimmed text content.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Check whether a font name indicates bold weight.
pub(crate) fn font_is_bold(fontname: &str) -> bool {
    let name = fontname.to_lowercase();
    name.contains("bold") || name.contains("black")
}

/// Check whether a font name indicates an italic or oblique face.
pub(crate) fn font_is_italic(fontname: &str) -> bool {
    let name = fontname.to_lowercase();
    name.contains("italic") || name.contains("oblique")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_detection() {
        assert!(font_is_bold("Helvetica-Bold"));
        assert!(font_is_bold("Arial-Black"));
        assert!(!font_is_bold("Helvetica"));

        assert!(font_is_italic("Times-Italic"));
        assert!(font_is_italic("Courier-Oblique"));
        assert!(!font_is_italic("Times-Roman"));
    }

    #[test]
    fn test_blank_line() {
        let line = Line {
            text: "   ".to_string(),
            size: 12.0,
            page_number: 1,
            fontname: String::new(),
            is_bold: false,
            is_italic: false,
            x0: 0.0,
            top: 0.0,
        };
        assert!(line.is_blank());
    }
}
