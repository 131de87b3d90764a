//! Tensor type aliases used throughout the pipeline.

/// A 4D tensor of f32 values (batch x channels x height x width).
pub type Tensor4D = ndarray::Array4<f32>;
