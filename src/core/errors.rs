//! Error types for the classification pipeline.
//!
//! This module defines the error taxonomy shared by every stage of the
//! pipeline: image validation, tensor encoding, inference, and score
//! selection. It also provides utility constructors for creating these
//! errors with appropriate context.

use thiserror::Error;

/// Enum representing the errors that can occur in the classification pipeline.
///
/// Preprocessing and selection errors are structural: they abort the current
/// classification attempt without retry and no partial result is returned.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The input image is unusable (for example, zero-sized).
    #[error("invalid image: {message}")]
    InvalidImage {
        /// A message describing why the image was rejected.
        message: String,
    },

    /// The score vector and the label table disagree in length.
    #[error("schema mismatch: {expected} labels but {actual} scores")]
    SchemaMismatch {
        /// Number of entries in the label table.
        expected: usize,
        /// Number of scores produced by the model.
        actual: usize,
    },

    /// A label lookup used an index outside the table.
    #[error("label index {index} out of range for table of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the label table.
        len: usize,
    },

    /// The model runtime failed. Wraps the underlying cause.
    #[error("inference: {context}")]
    Inference {
        /// Additional context about the failing call.
        context: String,
        /// The underlying runtime error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred while decoding an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor shaping.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl ClassifyError {
    /// Creates a ClassifyError for an unusable input image.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    /// Creates a ClassifyError for a score/label length mismatch.
    ///
    /// # Arguments
    ///
    /// * `expected` - The label table length.
    /// * `actual` - The score vector length.
    pub fn schema_mismatch(expected: usize, actual: usize) -> Self {
        Self::SchemaMismatch { expected, actual }
    }

    /// Creates a ClassifyError for an out-of-range label lookup.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Creates a ClassifyError wrapping a model runtime failure.
    ///
    /// # Arguments
    ///
    /// * `context` - What the runtime was doing when it failed.
    /// * `error` - The underlying error that caused this error.
    pub fn inference(
        context: impl Into<String>,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a ClassifyError wrapping a runtime failure described only by a message.
    pub fn inference_msg(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Inference {
            context: context.into(),
            source: Box::new(SimpleError::new(message)),
        }
    }

    /// Creates a ClassifyError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// Implementation of From<image::ImageError> for ClassifyError.
impl From<image::ImageError> for ClassifyError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

/// A minimal error type carrying only a message.
///
/// Used as the source of [`ClassifyError::Inference`] when the failure has no
/// underlying error value of its own.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_display() {
        let err = ClassifyError::schema_mismatch(4, 5);
        assert_eq!(err.to_string(), "schema mismatch: 4 labels but 5 scores");
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = ClassifyError::index_out_of_range(7, 3);
        assert_eq!(
            err.to_string(),
            "label index 7 out of range for table of length 3"
        );
    }

    #[test]
    fn test_inference_wraps_source() {
        use std::error::Error;

        let err = ClassifyError::inference("forward pass", SimpleError::new("runtime exploded"));
        assert!(err.to_string().contains("forward pass"));
        assert_eq!(err.source().unwrap().to_string(), "runtime exploded");
    }
}
