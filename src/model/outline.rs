//! Outline output types and ground-truth structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Heading nesting level.
///
/// Ordered by depth: `H1 < H2 < H3`. Serialized as `"H1"`, `"H2"`, `"H3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Default level assigned when a prediction carries no level.
    pub const DEFAULT: HeadingLevel = HeadingLevel::H3;

    /// All levels, in depth order.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// String form as it appears in the output format.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-line classifier output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingPrediction {
    /// Whether the line is a heading
    pub is_heading: bool,
    /// Confidence in [0, 1]
    pub confidence: f32,
    /// Predicted level, when the line is a heading and a level model was trained
    pub level: Option<HeadingLevel>,
}

impl HeadingPrediction {
    /// The prediction for anything that is not a heading.
    pub fn negative() -> Self {
        Self {
            is_heading: false,
            confidence: 0.0,
            level: None,
        }
    }
}

/// A single detected heading in the final outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Nesting level
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Source page number (1-indexed)
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The root output artifact: a title plus an ordered outline.
///
/// Serializes to `{"title": ..., "outline": [{"level", "text", "page"}, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Document title
    pub title: String,
    /// Headings in source reading order
    pub outline: Vec<Heading>,
}

impl DocumentStructure {
    /// Fallback title used when no text is available.
    pub const FALLBACK_TITLE: &'static str = "Untitled Document";

    /// Create a structure with a title and no headings.
    pub fn title_only(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Minimal placeholder for documents that could not be processed.
    pub fn placeholder() -> Self {
        Self::title_only(Self::FALLBACK_TITLE)
    }

    /// Serialize to the external JSON format.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// The body of one ground-truth file: `{"outline": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundTruth {
    /// Expected headings in reading order
    #[serde(default)]
    pub outline: Vec<Heading>,
}

impl GroundTruth {
    /// Parse a ground-truth JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Expected outlines for a corpus, keyed by document identifier.
#[derive(Debug, Clone, Default)]
pub struct ExpectedOutlines {
    entries: HashMap<String, Vec<Heading>>,
}

impl ExpectedOutlines {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a document identifier from a ground-truth file name.
    ///
    /// Uses the file stem: `"file04.json"` and `"file04"` both yield `"file04"`.
    pub fn document_id(file_name: &str) -> &str {
        let name = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        name.strip_suffix(".json").unwrap_or(name)
    }

    /// Insert an expected outline under a document identifier.
    pub fn insert(&mut self, id: impl Into<String>, outline: Vec<Heading>) {
        self.entries.insert(id.into(), outline);
    }

    /// Parse one ground-truth JSON body and register it under the given file name.
    pub fn insert_json(&mut self, file_name: &str, json: &str) -> Result<()> {
        let truth = GroundTruth::from_json(json)?;
        self.insert(Self::document_id(file_name), truth.outline);
        Ok(())
    }

    /// Look up the expected outline for a document.
    pub fn get(&self, id: &str) -> Option<&[Heading]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Iterate over (id, outline) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Heading])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of documents with ground truth.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serde_format() {
        let json = serde_json::to_string(&HeadingLevel::H2).unwrap();
        assert_eq!(json, "\"H2\"");

        let level: HeadingLevel = serde_json::from_str("\"H1\"").unwrap();
        assert_eq!(level, HeadingLevel::H1);
    }

    #[test]
    fn test_level_ordering() {
        assert!(HeadingLevel::H1 < HeadingLevel::H2);
        assert!(HeadingLevel::H2 < HeadingLevel::H3);
    }

    #[test]
    fn test_structure_json_shape() {
        let structure = DocumentStructure {
            title: "Report".to_string(),
            outline: vec![Heading::new(HeadingLevel::H1, "Introduction", 1)],
        };

        let json = structure.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Report","outline":[{"level":"H1","text":"Introduction","page":1}]}"#
        );
    }

    #[test]
    fn test_ground_truth_parse() {
        let json = r#"{"outline": [{"level": "H2", "text": "Background", "page": 3}]}"#;
        let truth = GroundTruth::from_json(json).unwrap();
        assert_eq!(truth.outline.len(), 1);
        assert_eq!(truth.outline[0].level, HeadingLevel::H2);
    }

    #[test]
    fn test_ground_truth_missing_outline() {
        let truth = GroundTruth::from_json("{}").unwrap();
        assert!(truth.outline.is_empty());
    }

    #[test]
    fn test_document_id_from_file_name() {
        assert_eq!(ExpectedOutlines::document_id("file04.json"), "file04");
        assert_eq!(
            ExpectedOutlines::document_id("expected/file04.json"),
            "file04"
        );
        assert_eq!(ExpectedOutlines::document_id("file04"), "file04");
    }

    #[test]
    fn test_expected_outlines_insert_json() {
        let mut expected = ExpectedOutlines::new();
        expected
            .insert_json("file01.json", r#"{"outline": []}"#)
            .unwrap();
        assert_eq!(expected.len(), 1);
        assert!(expected.get("file01").unwrap().is_empty());
    }

    #[test]
    fn test_placeholder_structure() {
        let s = DocumentStructure::placeholder();
        assert_eq!(s.title, "Untitled Document");
        assert!(s.outline.is_empty());
    }
}
