//! Constants used throughout the classification pipeline.
//!
//! This module defines default values for image preprocessing, inference
//! shapes, and score reporting.

/// The default input side length for classification models.
///
/// Input images are resized to a square of this size before encoding.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// The number of color channels in the model input tensor.
pub const TENSOR_CHANNELS: usize = 3;

/// The batch dimension of the model input tensor.
///
/// The pipeline classifies one image per call.
pub const BATCH_SIZE: usize = 1;

/// The default confidence threshold for best-match selection.
///
/// Scores below this value are not considered by
/// [`select_best_above_threshold`](crate::processors::select_best_above_threshold).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// The number of decimal places used when formatting confidence scores.
pub const SCORE_DECIMALS: usize = 8;

/// The default threshold for parallel processing.
///
/// This constant defines the minimum number of items that need
/// to be processed before parallel processing is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;
