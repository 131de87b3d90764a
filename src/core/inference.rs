//! Inference adapter for the classification pipeline.
//!
//! This module defines the [`InferenceEngine`] capability trait the pipeline
//! depends on, together with [`OrtEngine`], the ONNX Runtime implementation.
//! The adapter's responsibilities stop at the runtime boundary: select the
//! model's declared input, submit the encoded tensor, and flatten the output
//! into an ordered score sequence.

use crate::core::config::RuntimeConfig;
use crate::core::errors::ClassifyError;
use crate::core::tensor::Tensor4D;
use ort::session::{Session, builder::SessionBuilder};
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// Capability interface for an opaque model runtime.
///
/// The pipeline depends only on this trait, which keeps the runtime
/// swappable and allows stub engines in tests. `infer` makes a single
/// attempt per call: no retries and no caching of results.
pub trait InferenceEngine: Send + Sync {
    /// Runs the model on an encoded input tensor and returns the raw output
    /// scores as a flat sequence in row-major order.
    fn infer(&self, input: &Tensor4D) -> Result<Vec<f32>, ClassifyError>;
}

/// ONNX Runtime implementation of [`InferenceEngine`].
///
/// The session is initialized once at construction and torn down on drop.
/// ONNX Runtime sessions are not assumed safe for concurrent calls, so the
/// session is held behind a mutex and concurrent `infer` calls serialize.
#[derive(Debug)]
pub struct OrtEngine {
    /// The ONNX Runtime session, serialized for sequential reuse.
    session: Mutex<Session>,
    /// The model's declared input tensor name.
    input_name: String,
    /// The model's declared output tensor name.
    output_name: String,
    /// The model name for error context.
    model_name: String,
}

impl OrtEngine {
    /// Loads a model with default ONNX Runtime settings.
    ///
    /// # Arguments
    ///
    /// * `model_path` - The path to the ONNX model file.
    ///
    /// # Returns
    ///
    /// A Result containing the new OrtEngine instance or a ClassifyError.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ClassifyError> {
        Self::from_config(model_path, &RuntimeConfig::default())
    }

    /// Loads a model, applying the given session options.
    ///
    /// The input and output tensor names are taken from the session
    /// metadata: the model's single declared input and its first output.
    pub fn from_config(
        model_path: impl AsRef<Path>,
        runtime: &RuntimeConfig,
    ) -> Result<Self, ClassifyError> {
        let path = model_path.as_ref();
        let builder = Self::apply_runtime_config(Session::builder()?, runtime)?;
        let session = builder.commit_from_file(path).map_err(|e| {
            ClassifyError::inference(
                format!("failed to create ONNX session for '{}'", path.display()),
                e,
            )
        })?;
        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| {
                ClassifyError::inference_msg(
                    model_name.clone(),
                    "model declares no inputs - file may be invalid or corrupted",
                )
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                ClassifyError::inference_msg(
                    model_name.clone(),
                    "model declares no outputs - file may be invalid or corrupted",
                )
            })?;

        Ok(OrtEngine {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_name,
        })
    }

    fn apply_runtime_config(
        mut builder: SessionBuilder,
        runtime: &RuntimeConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        if let Some(intra) = runtime.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = runtime.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(par) = runtime.parallel_execution {
            builder = builder.with_parallel_execution(par)?;
        }
        Ok(builder)
    }

    /// Gets the name of the model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl InferenceEngine for OrtEngine {
    /// Submits the encoded tensor and flattens the runtime's result.
    ///
    /// The output may be multi-dimensional (typically batch x classes); it is
    /// returned flattened in row-major order. Any underlying runtime failure
    /// is wrapped in [`ClassifyError::Inference`].
    fn infer(&self, input: &Tensor4D) -> Result<Vec<f32>, ClassifyError> {
        let input_shape = input.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(input.view()).map_err(|e| {
            ClassifyError::inference(
                format!(
                    "model '{}': failed to convert input tensor with shape {:?}",
                    self.model_name, input_shape
                ),
                e,
            )
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            ClassifyError::inference_msg(
                self.model_name.clone(),
                "failed to acquire session lock",
            )
        })?;

        let outputs = session.run(inputs).map_err(|e| {
            ClassifyError::inference(
                format!(
                    "model '{}': forward pass failed with input '{}' -> output '{}'",
                    self.model_name, self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifyError::inference(
                    format!(
                        "model '{}': failed to extract output tensor '{}' as f32",
                        self.model_name, self.output_name
                    ),
                    e,
                )
            })?;

        let expected_len: usize = output_shape.iter().map(|&d| d.max(0) as usize).product();
        if output_data.len() != expected_len {
            return Err(ClassifyError::inference_msg(
                self.model_name.clone(),
                format!(
                    "output data size mismatch: shape {:?} implies {} values, got {}",
                    output_shape,
                    expected_len,
                    output_data.len()
                ),
            ));
        }

        // try_extract_tensor yields the backing buffer in row-major order, so
        // a 2D batch x classes output flattens by copying it through.
        Ok(output_data.to_vec())
    }
}
