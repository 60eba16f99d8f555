//! # outliner
//!
//! Document outline reconstruction from positioned text tokens.
//!
//! Given per-page word tokens from an external layout engine, this library
//! rebuilds text lines, classifies them with a trainable heading model, and
//! emits a hierarchical outline: a document title plus an ordered list of
//! H1/H2/H3 headings with source pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use outliner::{extract_outline, InMemorySource, TrainedModel};
//!
//! fn run(source: InMemorySource, model: &TrainedModel) -> outliner::Result<()> {
//!     let structure = extract_outline(&source, Some(model))?;
//!     println!("{}", structure.to_json(true)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Line grouping**: word tokens clustered into rows by geometric tolerances
//! - **Feature extraction**: an 18-value vector per line (typography, position, context)
//! - **Classification**: a two-stage trainable capability (heading, then level)
//! - **Margin suppression**: recurring running headers/footers filtered out
//! - **Title selection**: largest-font lines of the leading pages
//! - **Evaluation**: fuzzy-matched precision / recall / F1 / hierarchy accuracy
//!
//! The statistical models behind the classifier are external: implement
//! [`Estimator`] (and [`EstimatorFit`] for training) to plug one in. A
//! [`TrainedModel`] is immutable and `Send + Sync`, so batches of documents
//! can be processed in parallel against one shared instance.

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod layout;
pub mod margin;
pub mod model;
pub mod pipeline;
pub mod similarity;
pub mod source;
pub mod title;

// Re-export commonly used types
pub use classify::{Estimator, EstimatorFit, FeatureScaler, TrainedModel, Trainer, TrainingDocument};
pub use error::{Error, Result};
pub use evaluate::{evaluate_outline, summarize, EvaluationSummary, OutlineMetrics};
pub use features::{DocumentContext, FeatureVector, FEATURE_COUNT};
pub use model::{
    DocumentStructure, ExpectedOutlines, GroundTruth, Heading, HeadingLevel, HeadingPrediction,
    Line, PageWords, Word,
};
pub use pipeline::{extract_structure, extract_structure_batch, OutlineOptions};
pub use source::{FailingSource, InMemorySource, WordSource};

/// Extract the outline of one document with default options.
///
/// See [`pipeline::extract_structure`] for the full contract.
pub fn extract_outline<S: WordSource + ?Sized>(
    source: &S,
    model: Option<&TrainedModel>,
) -> Result<DocumentStructure> {
    pipeline::extract_structure(source, model, &OutlineOptions::default())
}

/// Extract outlines for a batch of documents with default options.
///
/// Documents are processed in parallel; per-document failures degrade to
/// placeholder structures instead of aborting the batch.
pub fn extract_outline_batch<S: WordSource + Sync>(
    sources: &[S],
    model: Option<&TrainedModel>,
) -> Vec<DocumentStructure> {
    pipeline::extract_structure_batch(sources, model, &OutlineOptions::default())
}
