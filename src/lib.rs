//! # photoclass
//!
//! A Rust library that classifies photos with a bundled ONNX model and
//! reports per-class confidence scores.
//!
//! ## Features
//!
//! - Image-to-tensor preprocessing: resize + normalize into the channel-planar
//!   `[1, 3, 224, 224]` float layout classification models expect
//! - ONNX Runtime integration behind a swappable engine trait
//! - Two selection policies: thresholded best match and a full per-class report
//! - Background execution on a dedicated worker thread
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, tensor aliases, and the inference engine
//! * [`labels`] - Ordered class-name table
//! * [`processors`] - Tensor encoding and score selection
//! * [`pipeline`] - End-to-end classifier and background worker
//! * [`utils`] - Image loading and model asset staging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photoclass::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = ClassifierBuilder::new("assets/model.onnx", "assets/labels.txt")
//!     .staging_dir("/tmp/photoclass")
//!     .build()?;
//!
//! let image = image::open("photo.jpg")?;
//! let report = classifier.classify(&image)?;
//! print!("{}", report.to_display_string());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod labels;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use photoclass::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{ClassifierConfig, ClassifyError, InferenceEngine, RuntimeConfig};
    pub use crate::labels::LabelTable;
    pub use crate::pipeline::{Classifier, ClassifierBuilder, ClassifyWorker};
    pub use crate::processors::{ClassPrediction, ClassReport, ScoreSelector, TensorEncoder};
    pub use crate::utils::load_image;
}
