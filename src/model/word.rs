//! Word tokens as delivered by the external extraction engine.

use serde::{Deserialize, Serialize};

/// A positioned word token extracted from one page of a document.
///
/// Coordinates are page-relative: `x0`/`x1` are the left and right edges,
/// `top` is the distance from the top of the page. Words are immutable once
/// extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// The text content of the word
    pub text: String,
    /// Left edge X coordinate
    pub x0: f32,
    /// Right edge X coordinate
    pub x1: f32,
    /// Distance from the top of the page
    pub top: f32,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub fontname: String,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl Word {
    /// Create a new word token.
    pub fn new(
        text: impl Into<String>,
        x0: f32,
        x1: f32,
        top: f32,
        size: f32,
        fontname: impl Into<String>,
        page_number: u32,
    ) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            size,
            fontname: fontname.into(),
            page_number,
        }
    }
}

/// One page of extracted words, with the page geometry needed downstream.
///
/// Invariant: every word's `page_number` matches `number`.
#[derive(Debug, Clone)]
pub struct PageWords {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page height in the same units as word coordinates
    pub height: f32,
    /// Words on this page, in extraction order
    pub words: Vec<Word>,
}

impl PageWords {
    /// Create a new page of words.
    pub fn new(number: u32, height: f32, words: Vec<Word>) -> Self {
        Self {
            number,
            height,
            words,
        }
    }

    /// Check if the page has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
