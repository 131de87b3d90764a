//! Configuration types for the classification pipeline.
//!
//! This module provides the serde-friendly configuration consumed by
//! [`ClassifierBuilder`](crate::pipeline::ClassifierBuilder) and the ONNX
//! Runtime session options applied when the engine is built.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::constants::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_INPUT_SIZE};

/// ONNX Runtime session options.
///
/// All fields are optional; unset fields leave the runtime default in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Number of threads used to parallelize execution within nodes.
    pub intra_threads: Option<usize>,
    /// Number of threads used to parallelize execution across nodes.
    pub inter_threads: Option<usize>,
    /// Whether to enable parallel execution of the graph.
    pub parallel_execution: Option<bool>,
}

impl RuntimeConfig {
    /// Creates a new RuntimeConfig with all options unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the intra-op thread count.
    pub fn intra_threads(mut self, threads: usize) -> Self {
        self.intra_threads = Some(threads);
        self
    }

    /// Sets the inter-op thread count.
    pub fn inter_threads(mut self, threads: usize) -> Self {
        self.inter_threads = Some(threads);
        self
    }

    /// Enables or disables parallel graph execution.
    pub fn parallel_execution(mut self, enabled: bool) -> Self {
        self.parallel_execution = Some(enabled);
        self
    }
}

/// Configuration for building a [`Classifier`](crate::pipeline::Classifier).
///
/// Serializable so deployments can ship it as JSON next to the model assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Path to the bundled ONNX model file.
    pub model_path: PathBuf,
    /// Path to the line-delimited label file.
    pub labels_path: PathBuf,
    /// Writable directory the model asset is staged into before the session
    /// opens it. When unset the model is opened in place.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
    /// Input side length the encoder resizes to.
    #[serde(default = "default_input_size")]
    pub input_size: u32,
    /// Confidence threshold for best-match selection.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// ONNX Runtime session options.
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

fn default_input_size() -> u32 {
    DEFAULT_INPUT_SIZE
}

fn default_confidence_threshold() -> f32 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

impl ClassifierConfig {
    /// Creates a configuration from the two required asset paths, leaving
    /// every other field at its default.
    pub fn new(model_path: impl Into<PathBuf>, labels_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            labels_path: labels_path.into(),
            staging_dir: None,
            input_size: DEFAULT_INPUT_SIZE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            runtime: RuntimeConfig::default(),
        }
    }
}
