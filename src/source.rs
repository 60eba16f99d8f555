//! Word-source capability: the boundary to the external extraction engine.

use crate::error::{Error, Result};
use crate::model::PageWords;

/// A per-document supplier of positioned word tokens.
///
/// Implementations wrap an external layout/extraction engine. The core only
/// requires that a document can be turned into an ordered list of pages, each
/// carrying its words and page height. A failing engine should return
/// [`Error::Extraction`]; the batch driver decides whether to degrade or abort.
pub trait WordSource {
    /// All pages of the document, in ascending page order.
    fn pages(&self) -> Result<Vec<PageWords>>;
}

/// A word source backed by already-extracted pages.
///
/// Useful for tests and for callers that run the extraction engine themselves.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pages: Vec<PageWords>,
}

impl InMemorySource {
    /// Create a source from pre-extracted pages.
    pub fn new(pages: Vec<PageWords>) -> Self {
        Self { pages }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl WordSource for InMemorySource {
    fn pages(&self) -> Result<Vec<PageWords>> {
        Ok(self.pages.clone())
    }
}

/// A source that always fails, standing in for an unreadable document.
#[derive(Debug, Clone)]
pub struct FailingSource {
    reason: String,
}

impl FailingSource {
    /// Create a failing source with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl WordSource for FailingSource {
    fn pages(&self) -> Result<Vec<PageWords>> {
        Err(Error::Extraction(self.reason.clone()))
    }
}
