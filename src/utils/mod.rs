//! Utility functions for the classification pipeline.
//!
//! This module provides image loading helpers and model asset staging.

pub mod assets;
pub mod image;

pub use assets::stage_model_asset;
pub use image::{dynamic_to_rgb, load_image, load_images_batch, load_images_batch_with_threshold};
