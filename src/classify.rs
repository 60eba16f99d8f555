//! Heading classification capability.
//!
//! The statistical models themselves are external: anything implementing
//! [`Estimator`] can back the two-stage protocol (is-this-a-heading, then
//! which-level). This module owns everything around them: feature scaling,
//! label derivation from ground-truth outlines, the immutable [`TrainedModel`]
//! used at prediction time, and the [`Trainer`] that produces one.
//!
//! The model/trainer split is deliberate: a `TrainedModel` is read-only and
//! `Send + Sync`, so one instance can be shared across concurrent
//! per-document prediction tasks, while training happens in a separate,
//! non-concurrent phase.

use crate::error::{Error, Result};
use crate::features::{self, DocumentContext, FeatureVector, FEATURE_COUNT};
use crate::layout;
use crate::model::{Heading, HeadingLevel, HeadingPrediction, Line};
use crate::similarity::{find_best_match, MATCH_THRESHOLD};
use crate::source::WordSource;

/// Minimum trimmed length for a line to participate in training or prediction.
pub(crate) const MIN_TEXT_LEN: usize = 3;

/// An external statistical model: predicts a class label and a score for a
/// scaled feature vector.
///
/// For the binary heading stage the label is 0/1 and the score is the
/// positive-class probability. For the level stage the label indexes the
/// trained level table and the score is unused.
pub trait Estimator: Send + Sync {
    /// Predict `(label, score)` for one scaled feature vector.
    fn predict(&self, features: &FeatureVector) -> (u32, f32);
}

/// A trainable estimator factory: fits a model to labeled feature vectors.
pub trait EstimatorFit {
    /// Fit a model. `features` and `labels` have equal length.
    fn fit(&self, features: &[FeatureVector], labels: &[u32]) -> Result<Box<dyn Estimator>>;
}

/// Per-dimension standard scaling, fit once on training data.
///
/// The same fitted scaler is reused unmodified at prediction time; it is part
/// of the trained-model artifact, never refit.
#[derive(Debug, Clone)]
pub struct FeatureScaler {
    mean: [f32; FEATURE_COUNT],
    scale: [f32; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Fit a scaler to a set of feature vectors.
    ///
    /// Dimensions with zero variance pass through unscaled.
    pub fn fit(samples: &[FeatureVector]) -> Self {
        let n = samples.len().max(1) as f64;

        let mut mean = [0.0f32; FEATURE_COUNT];
        for dim in 0..FEATURE_COUNT {
            let sum: f64 = samples.iter().map(|s| s[dim] as f64).sum();
            mean[dim] = (sum / n) as f32;
        }

        let mut scale = [1.0f32; FEATURE_COUNT];
        for dim in 0..FEATURE_COUNT {
            let var: f64 = samples
                .iter()
                .map(|s| {
                    let d = s[dim] as f64 - mean[dim] as f64;
                    d * d
                })
                .sum::<f64>()
                / n;
            let std = var.sqrt() as f32;
            if std > 0.0 {
                scale[dim] = std;
            }
        }

        Self { mean, scale }
    }

    /// Identity scaler (zero mean shift, unit scale).
    pub fn identity() -> Self {
        Self {
            mean: [0.0; FEATURE_COUNT],
            scale: [1.0; FEATURE_COUNT],
        }
    }

    /// Standardize one feature vector.
    pub fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = [0.0f32; FEATURE_COUNT];
        for dim in 0..FEATURE_COUNT {
            out[dim] = (features[dim] - self.mean[dim]) / self.scale[dim];
        }
        FeatureVector(out)
    }
}

/// An immutable, shareable trained model: scaler plus the two estimators.
pub struct TrainedModel {
    heading: Box<dyn Estimator>,
    level: Option<Box<dyn Estimator>>,
    scaler: FeatureScaler,
    levels: Vec<HeadingLevel>,
}

impl TrainedModel {
    /// Assemble a model from its parts.
    ///
    /// `levels` is the level class table in encoding order: the level
    /// estimator's label `i` maps to `levels[i]`. Callers reconstructing a
    /// model from a persisted artifact use this directly.
    pub fn new(
        heading: Box<dyn Estimator>,
        level: Option<Box<dyn Estimator>>,
        scaler: FeatureScaler,
        levels: Vec<HeadingLevel>,
    ) -> Self {
        Self {
            heading,
            level,
            scaler,
            levels,
        }
    }

    /// Predict heading status, confidence, and level for one feature vector.
    ///
    /// The level stage is only consulted when the heading stage is positive
    /// and at least one level class was seen during training.
    pub fn predict(&self, features: &FeatureVector) -> HeadingPrediction {
        let scaled = self.scaler.transform(features);
        let (label, confidence) = self.heading.predict(&scaled);
        let is_heading = label == 1;

        let level = if is_heading && !self.levels.is_empty() {
            self.level.as_ref().and_then(|estimator| {
                let (idx, _) = estimator.predict(&scaled);
                self.levels.get(idx as usize).copied()
            })
        } else {
            None
        };

        HeadingPrediction {
            is_heading,
            confidence,
            level,
        }
    }

    /// The level class table, in encoding order.
    pub fn level_classes(&self) -> &[HeadingLevel] {
        &self.levels
    }
}

impl std::fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainedModel")
            .field("levels", &self.levels)
            .field("has_level_model", &self.level.is_some())
            .finish()
    }
}

/// One document prepared for training: its lines, statistics, and the
/// ground-truth outline used to derive labels.
#[derive(Debug, Clone)]
pub struct TrainingDocument {
    /// Document lines in reading order
    pub lines: Vec<Line>,
    /// Document-wide statistics
    pub context: DocumentContext,
    /// Ground-truth headings
    pub expected: Vec<Heading>,
}

impl TrainingDocument {
    /// Build a training document from a word source and its ground truth.
    pub fn from_source<S: WordSource + ?Sized>(
        source: &S,
        expected: Vec<Heading>,
    ) -> Result<Self> {
        let pages = source.pages()?;
        let lines = layout::group_pages(&pages);
        let context = DocumentContext::from_pages(&pages, &lines);
        Ok(Self {
            lines,
            context,
            expected,
        })
    }
}

/// Derived training samples for both classification stages.
#[derive(Debug, Default)]
struct SampleSet {
    heading_x: Vec<FeatureVector>,
    heading_y: Vec<u32>,
    level_x: Vec<FeatureVector>,
    level_y: Vec<HeadingLevel>,
}

/// Produces a [`TrainedModel`] from ground-truth-labeled documents.
pub struct Trainer {
    heading_fit: Box<dyn EstimatorFit>,
    level_fit: Box<dyn EstimatorFit>,
}

impl Trainer {
    /// Create a trainer from the two estimator factories.
    pub fn new(heading_fit: Box<dyn EstimatorFit>, level_fit: Box<dyn EstimatorFit>) -> Self {
        Self {
            heading_fit,
            level_fit,
        }
    }

    /// Train a model on a corpus of documents.
    ///
    /// A line becomes a positive heading sample when its best ground-truth
    /// match scores at least the shared similarity threshold; the matched
    /// heading's level becomes its level label. Returns
    /// [`Error::Training`] when the corpus yields no samples at all.
    pub fn train(&self, docs: &[TrainingDocument]) -> Result<TrainedModel> {
        let samples = collect_samples(docs);

        if samples.heading_x.is_empty() {
            return Err(Error::Training(
                "no training samples derived from ground truth".to_string(),
            ));
        }

        log::debug!(
            "Training on {} samples ({} positive, {} level samples)",
            samples.heading_x.len(),
            samples.heading_y.iter().filter(|&&y| y == 1).count(),
            samples.level_x.len()
        );

        let scaler = FeatureScaler::fit(&samples.heading_x);
        let scaled_heading: Vec<FeatureVector> = samples
            .heading_x
            .iter()
            .map(|fv| scaler.transform(fv))
            .collect();
        let heading = self.heading_fit.fit(&scaled_heading, &samples.heading_y)?;

        // Level classes in encoding order: sorted unique levels seen.
        let mut levels: Vec<HeadingLevel> = samples.level_y.clone();
        levels.sort();
        levels.dedup();

        let level = if samples.level_x.is_empty() {
            None
        } else {
            let scaled_level: Vec<FeatureVector> = samples
                .level_x
                .iter()
                .map(|fv| scaler.transform(fv))
                .collect();
            let encoded: Vec<u32> = samples
                .level_y
                .iter()
                .map(|l| levels.iter().position(|c| c == l).unwrap_or(0) as u32)
                .collect();
            Some(self.level_fit.fit(&scaled_level, &encoded)?)
        };

        Ok(TrainedModel::new(heading, level, scaler, levels))
    }
}

/// Derive labeled samples from every document in the corpus.
fn collect_samples(docs: &[TrainingDocument]) -> SampleSet {
    let mut samples = SampleSet::default();

    for doc in docs {
        for (idx, line) in doc.lines.iter().enumerate() {
            let text = line.trimmed();
            if text.chars().count() < MIN_TEXT_LEN {
                continue;
            }

            let fv = features::extract(&doc.lines, idx, &doc.context);
            let (level, score) = find_best_match(text, &doc.expected);

            if score >= MATCH_THRESHOLD {
                samples.heading_y.push(1);
                samples.level_x.push(fv);
                samples.level_y.push(level);
            } else {
                samples.heading_y.push(0);
            }
            samples.heading_x.push(fv);
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-output estimator for wiring tests.
    struct Fixed(u32, f32);

    impl Estimator for Fixed {
        fn predict(&self, _features: &FeatureVector) -> (u32, f32) {
            (self.0, self.1)
        }
    }

    /// Fitter that checks sample counts and returns a fixed estimator.
    struct CountingFit {
        expect: usize,
        out: (u32, f32),
    }

    impl EstimatorFit for CountingFit {
        fn fit(&self, features: &[FeatureVector], labels: &[u32]) -> Result<Box<dyn Estimator>> {
            assert_eq!(features.len(), labels.len());
            assert_eq!(features.len(), self.expect);
            Ok(Box::new(Fixed(self.out.0, self.out.1)))
        }
    }

    fn line(text: &str, size: f32, top: f32) -> Line {
        Line {
            text: text.to_string(),
            size,
            page_number: 1,
            fontname: "Helvetica".to_string(),
            is_bold: false,
            is_italic: false,
            x0: 72.0,
            top,
        }
    }

    fn training_doc() -> TrainingDocument {
        let lines = vec![
            line("Introduction", 18.0, 80.0),
            line("Body text about many things.", 12.0, 110.0),
            line("ab", 12.0, 130.0), // too short, skipped
        ];
        let context = DocumentContext::new(&lines, 12.0, 800.0);
        TrainingDocument {
            lines,
            context,
            expected: vec![Heading::new(HeadingLevel::H1, "Introduction", 1)],
        }
    }

    #[test]
    fn test_scaler_standardizes() {
        let mut a = [0.0; FEATURE_COUNT];
        let mut b = [0.0; FEATURE_COUNT];
        a[0] = 2.0;
        b[0] = 4.0;
        let scaler = FeatureScaler::fit(&[FeatureVector(a), FeatureVector(b)]);

        let ta = scaler.transform(&FeatureVector(a));
        let tb = scaler.transform(&FeatureVector(b));
        assert_eq!(ta[0], -1.0);
        assert_eq!(tb[0], 1.0);
        // Constant dimensions pass through centered but unscaled.
        assert_eq!(ta[1], 0.0);
    }

    #[test]
    fn test_scaler_identity() {
        let fv = FeatureVector([3.0; FEATURE_COUNT]);
        let out = FeatureScaler::identity().transform(&fv);
        assert_eq!(out, fv);
    }

    #[test]
    fn test_sample_derivation() {
        let samples = collect_samples(&[training_doc()]);
        // Two usable lines: one positive ("Introduction"), one negative.
        assert_eq!(samples.heading_x.len(), 2);
        assert_eq!(samples.heading_y, vec![1, 0]);
        assert_eq!(samples.level_y, vec![HeadingLevel::H1]);
    }

    #[test]
    fn test_trainer_produces_model() {
        let trainer = Trainer::new(
            Box::new(CountingFit {
                expect: 2,
                out: (1, 0.9),
            }),
            Box::new(CountingFit {
                expect: 1,
                out: (0, 1.0),
            }),
        );
        let model = trainer.train(&[training_doc()]).unwrap();
        assert_eq!(model.level_classes(), &[HeadingLevel::H1]);

        let doc = training_doc();
        let fv = features::extract(&doc.lines, 0, &doc.context);
        let prediction = model.predict(&fv);
        assert!(prediction.is_heading);
        assert_eq!(prediction.confidence, 0.9);
        assert_eq!(prediction.level, Some(HeadingLevel::H1));
    }

    #[test]
    fn test_trainer_empty_corpus() {
        let trainer = Trainer::new(
            Box::new(CountingFit {
                expect: 0,
                out: (0, 0.0),
            }),
            Box::new(CountingFit {
                expect: 0,
                out: (0, 0.0),
            }),
        );
        assert!(matches!(trainer.train(&[]), Err(Error::Training(_))));
    }

    #[test]
    fn test_negative_prediction_has_no_level() {
        let model = TrainedModel::new(
            Box::new(Fixed(0, 0.2)),
            Some(Box::new(Fixed(0, 1.0))),
            FeatureScaler::identity(),
            vec![HeadingLevel::H1],
        );
        let prediction = model.predict(&FeatureVector([0.0; FEATURE_COUNT]));
        assert!(!prediction.is_heading);
        assert_eq!(prediction.level, None);
    }

    #[test]
    fn test_positive_without_level_classes() {
        let model = TrainedModel::new(
            Box::new(Fixed(1, 0.8)),
            None,
            FeatureScaler::identity(),
            Vec::new(),
        );
        let prediction = model.predict(&FeatureVector([0.0; FEATURE_COUNT]));
        assert!(prediction.is_heading);
        assert_eq!(prediction.level, None);
    }
}
