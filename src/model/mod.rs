//! Data model types for outline reconstruction.

pub(crate) mod line;
mod outline;
mod word;

pub use line::Line;
pub use outline::{
    DocumentStructure, ExpectedOutlines, GroundTruth, Heading, HeadingLevel, HeadingPrediction,
};
pub use word::{PageWords, Word};
