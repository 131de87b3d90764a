//! End-to-end classification pipeline.
//!
//! A [`Classifier`] ties the pieces together: encode the image, run the
//! inference engine, check the score/label invariant, and produce either the
//! full per-class report or the thresholded best match. Each call is one
//! independent unit of work; the only shared state is the read-only label
//! table and the engine handle.

use crate::core::config::{ClassifierConfig, RuntimeConfig};
use crate::core::constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_INPUT_SIZE};
use crate::core::errors::ClassifyError;
use crate::core::inference::{InferenceEngine, OrtEngine};
use crate::labels::LabelTable;
use crate::processors::{ClassPrediction, ClassReport, ScoreSelector, TensorEncoder};
use crate::utils::stage_model_asset;
use image::{DynamicImage, RgbImage, imageops::FilterType};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// An image classifier backed by an opaque inference engine.
///
/// The engine is initialized once at construction and torn down when the
/// last handle drops.
pub struct Classifier {
    engine: Arc<dyn InferenceEngine>,
    encoder: TensorEncoder,
    selector: ScoreSelector,
    labels: Arc<LabelTable>,
}

impl Classifier {
    /// Assembles a classifier from already-constructed parts.
    ///
    /// This is the injection seam: tests pass a stub engine, applications
    /// can share one engine across several classifiers.
    pub fn from_parts(
        engine: Arc<dyn InferenceEngine>,
        labels: Arc<LabelTable>,
        encoder: TensorEncoder,
        selector: ScoreSelector,
    ) -> Self {
        Self {
            engine,
            encoder,
            selector,
            labels,
        }
    }

    /// Returns the label table this classifier reports against.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    fn run_scores(&self, image: &DynamicImage) -> Result<Vec<f32>, ClassifyError> {
        let tensor = self.encoder.encode(image)?;
        let scores = self.engine.infer(&tensor)?;
        debug!("raw output values: {:?}", scores);
        Ok(scores)
    }

    /// Classifies an image and returns the full per-class report.
    ///
    /// The report pairs every score with its label in label-table order; no
    /// thresholding, no sorting.
    pub fn classify(&self, image: &DynamicImage) -> Result<ClassReport, ClassifyError> {
        let scores = self.run_scores(image)?;
        self.selector.format_report(&scores, &self.labels)
    }

    /// Classifies an already-RGB image and returns the full report.
    pub fn classify_rgb(&self, image: &RgbImage) -> Result<ClassReport, ClassifyError> {
        let tensor = self.encoder.encode_rgb(image)?;
        let scores = self.engine.infer(&tensor)?;
        debug!("raw output values: {:?}", scores);
        self.selector.format_report(&scores, &self.labels)
    }

    /// Classifies an image and returns the best prediction at or above the
    /// configured confidence threshold, or `Ok(None)` when nothing meets it.
    pub fn best_match(
        &self,
        image: &DynamicImage,
    ) -> Result<Option<ClassPrediction>, ClassifyError> {
        let scores = self.run_scores(image)?;
        self.selector.best_match(&scores, &self.labels)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("encoder", &self.encoder)
            .field("selector", &self.selector)
            .field("num_labels", &self.labels.len())
            .finish()
    }
}

/// Builder for [`Classifier`].
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    model_path: PathBuf,
    labels_path: PathBuf,
    staging_dir: Option<PathBuf>,
    input_size: u32,
    resize_filter: FilterType,
    confidence_threshold: f32,
    runtime: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a builder from the two required asset paths.
    pub fn new(model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            staging_dir: None,
            input_size: DEFAULT_INPUT_SIZE,
            resize_filter: FilterType::Triangle,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            runtime: RuntimeConfig::default(),
        }
    }

    /// Creates a builder from a serialized configuration.
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self {
            model_path: config.model_path,
            labels_path: config.labels_path,
            staging_dir: config.staging_dir,
            input_size: config.input_size,
            resize_filter: FilterType::Triangle,
            confidence_threshold: config.confidence_threshold,
            runtime: config.runtime,
        }
    }

    /// Stages the model into this writable directory before opening it.
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    /// Sets the input side length the encoder resizes to.
    pub fn input_size(mut self, size: u32) -> Self {
        self.input_size = size;
        self
    }

    /// Sets the resize filter.
    pub fn resize_filter(mut self, filter: FilterType) -> Self {
        self.resize_filter = filter;
        self
    }

    /// Sets the confidence threshold for best-match selection.
    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Sets the ONNX Runtime session options.
    pub fn runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    /// Builds the classifier: stages the model asset if requested, loads the
    /// label table, and creates the inference session.
    pub fn build(self) -> Result<Classifier, ClassifyError> {
        info!("initializing classifier from {:?}", self.model_path);

        let model_path = match &self.staging_dir {
            Some(dir) => stage_model_asset(&self.model_path, dir)?,
            None => self.model_path.clone(),
        };

        let labels = Arc::new(LabelTable::from_file(&self.labels_path)?);
        if labels.is_empty() {
            return Err(ClassifyError::config_error(format!(
                "label table {} is empty",
                self.labels_path.display()
            )));
        }
        info!("loaded {} class labels", labels.len());

        let engine = Arc::new(OrtEngine::from_config(&model_path, &self.runtime)?);

        Ok(Classifier::from_parts(
            engine,
            labels,
            TensorEncoder::new(self.input_size, self.resize_filter),
            ScoreSelector::new(self.confidence_threshold),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SimpleError;
    use crate::core::tensor::Tensor4D;

    /// Engine stub returning a fixed score vector.
    struct StubEngine {
        scores: Vec<f32>,
    }

    impl InferenceEngine for StubEngine {
        fn infer(&self, _input: &Tensor4D) -> Result<Vec<f32>, ClassifyError> {
            Ok(self.scores.clone())
        }
    }

    struct FailingEngine;

    impl InferenceEngine for FailingEngine {
        fn infer(&self, _input: &Tensor4D) -> Result<Vec<f32>, ClassifyError> {
            Err(ClassifyError::inference(
                "stub",
                SimpleError::new("model not loaded"),
            ))
        }
    }

    fn test_classifier(scores: Vec<f32>, labels: &[&str]) -> Classifier {
        Classifier::from_parts(
            Arc::new(StubEngine { scores }),
            Arc::new(LabelTable::from_names(
                labels.iter().map(|n| n.to_string()).collect(),
            )),
            TensorEncoder::default(),
            ScoreSelector::default(),
        )
    }

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(10, 10, image::Rgb([120, 30, 200])))
    }

    #[test]
    fn test_classify_end_to_end_report() {
        let classifier = test_classifier(vec![0.05, 0.93, 0.02], &["cat", "dog", "bird"]);

        let report = classifier.classify(&test_image()).unwrap();
        let text = report.to_display_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "dog: 0.93000000");
    }

    #[test]
    fn test_best_match_end_to_end() {
        let classifier = test_classifier(vec![0.05, 0.93, 0.02], &["cat", "dog", "bird"]);

        let prediction = classifier.best_match(&test_image()).unwrap().unwrap();
        assert_eq!(prediction.name, "dog");
        assert_eq!(prediction.index, 1);
    }

    #[test]
    fn test_schema_mismatch_surfaces() {
        let classifier = test_classifier(vec![0.4, 0.6], &["cat", "dog", "bird"]);

        let err = classifier.classify(&test_image()).unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::SchemaMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_inference_error_propagates() {
        let classifier = Classifier::from_parts(
            Arc::new(FailingEngine),
            Arc::new(LabelTable::from_names(vec!["cat".to_string()])),
            TensorEncoder::default(),
            ScoreSelector::default(),
        );

        let err = classifier.classify(&test_image()).unwrap_err();
        assert!(matches!(err, ClassifyError::Inference { .. }));
    }

    #[test]
    fn test_invalid_image_rejected_before_inference() {
        let classifier = test_classifier(vec![1.0], &["cat"]);
        let empty = DynamicImage::new_rgb8(0, 0);

        let err = classifier.classify(&empty).unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidImage { .. }));
    }

    #[test]
    fn test_builder_missing_model_fails() {
        let labels_file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(labels_file.path(), "cat\ndog\n").unwrap();

        let result = ClassifierBuilder::new("no_such_model.onnx", labels_file.path()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_empty_labels_fails() {
        let labels_file = tempfile::NamedTempFile::new().unwrap();

        let result = ClassifierBuilder::new("no_such_model.onnx", labels_file.path()).build();
        assert!(matches!(result, Err(ClassifyError::ConfigError { .. })));
    }
}
