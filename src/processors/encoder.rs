//! Tensor encoding for classification model input.
//!
//! This module converts a decoded image into the flat channel-planar float
//! tensor the model expects: shape `[1, 3, size, size]`, all red values
//! first, then green, then blue, each plane row-major, every value scaled
//! into `[0, 1]` by dividing the raw 8-bit channel value by 255.

use crate::core::constants::{BATCH_SIZE, DEFAULT_INPUT_SIZE, TENSOR_CHANNELS};
use crate::core::errors::ClassifyError;
use crate::core::tensor::Tensor4D;
use image::{DynamicImage, RgbImage, imageops::FilterType};

/// Encodes images into the model's input tensor layout.
///
/// The encoder is a pure function of its inputs: encoding the same image
/// twice produces bit-identical buffers. The resize filter is configurable
/// but must be used consistently, since it affects prediction quality.
#[derive(Debug, Clone)]
pub struct TensorEncoder {
    /// Side length the image is resized to before encoding.
    input_size: u32,
    /// Resampling filter used for the resize.
    resize_filter: FilterType,
}

impl Default for TensorEncoder {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            resize_filter: FilterType::Triangle,
        }
    }
}

impl TensorEncoder {
    /// Creates a new encoder with the given target size and resize filter.
    ///
    /// # Arguments
    ///
    /// * `input_size` - Side length of the square model input.
    /// * `resize_filter` - Resampling filter, typically a smooth one such as
    ///   [`FilterType::Triangle`].
    pub fn new(input_size: u32, resize_filter: FilterType) -> Self {
        Self {
            input_size,
            resize_filter,
        }
    }

    /// Returns the configured input side length.
    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    /// Encodes a decoded image into the model input tensor.
    ///
    /// Non-RGB images (grayscale, indexed, with alpha) are normalized to RGB
    /// first; the alpha channel is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidImage`] for a zero-sized input.
    pub fn encode(&self, image: &DynamicImage) -> Result<Tensor4D, ClassifyError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(ClassifyError::invalid_image(format!(
                "zero-sized input image ({width}x{height})"
            )));
        }
        self.encode_rgb(&image.to_rgb8())
    }

    /// Encodes an RGB image into the model input tensor.
    pub fn encode_rgb(&self, image: &RgbImage) -> Result<Tensor4D, ClassifyError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifyError::invalid_image(format!(
                "zero-sized input image ({width}x{height})"
            )));
        }

        let size = self.input_size;
        let resized = if (width, height) == (size, size) {
            image.clone()
        } else {
            image::imageops::resize(image, size, size, self.resize_filter)
        };

        let side = size as usize;
        let plane = side * side;
        let mut data = vec![0.0f32; TENSOR_CHANNELS * plane];

        for y in 0..side {
            for x in 0..side {
                let pixel = resized.get_pixel(x as u32, y as u32);
                let idx = y * side + x;
                data[idx] = pixel[0] as f32 / 255.0;
                data[plane + idx] = pixel[1] as f32 / 255.0;
                data[2 * plane + idx] = pixel[2] as f32 / 255.0;
            }
        }

        Tensor4D::from_shape_vec((BATCH_SIZE, TENSOR_CHANNELS, side, side), data)
            .map_err(ClassifyError::Tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_encode_shape_and_range() {
        let encoder = TensorEncoder::default();
        let img = solid_image(10, 10, [13, 128, 250]);

        let tensor = encoder.encode_rgb(&img).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);
        assert_eq!(tensor.len(), 3 * 224 * 224);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_channel_planar_layout_for_solid_red() {
        let encoder = TensorEncoder::default();
        let img = solid_image(50, 50, [255, 0, 0]);

        let tensor = encoder.encode_rgb(&img).unwrap();
        let (buffer, _) = tensor.into_raw_vec_and_offset();
        let plane = 224 * 224;

        assert!(buffer[..plane].iter().all(|&v| (v - 1.0).abs() < 1e-3));
        assert!(buffer[plane..2 * plane].iter().all(|&v| v.abs() < 1e-3));
        assert!(buffer[2 * plane..].iter().all(|&v| v.abs() < 1e-3));
    }

    #[test]
    fn test_plane_values_match_channel_over_255() {
        let encoder = TensorEncoder::default();
        let img = solid_image(224, 224, [51, 102, 204]);

        let tensor = encoder.encode_rgb(&img).unwrap();
        assert_eq!(tensor[[0, 0, 17, 101]], 51.0 / 255.0);
        assert_eq!(tensor[[0, 1, 17, 101]], 102.0 / 255.0);
        assert_eq!(tensor[[0, 2, 17, 101]], 204.0 / 255.0);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = TensorEncoder::default();
        let mut img = solid_image(10, 10, [10, 20, 30]);
        img.put_pixel(3, 7, Rgb([200, 100, 50]));

        let first = encoder.encode_rgb(&img).unwrap();
        let second = encoder.encode_rgb(&img).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_sized_image_rejected() {
        let encoder = TensorEncoder::default();
        let img = DynamicImage::new_rgb8(0, 0);

        let err = encoder.encode(&img).unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidImage { .. }));
    }

    #[test]
    fn test_grayscale_normalized_to_rgb() {
        let encoder = TensorEncoder::default();
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(8, 8, image::Luma([77])));

        let tensor = encoder.encode(&gray).unwrap();
        let expected = 77.0 / 255.0;
        assert!((tensor[[0, 0, 100, 100]] - expected).abs() < 1e-2);
        assert!((tensor[[0, 1, 100, 100]] - expected).abs() < 1e-2);
        assert!((tensor[[0, 2, 100, 100]] - expected).abs() < 1e-2);
    }

    #[test]
    fn test_alpha_channel_ignored() {
        let encoder = TensorEncoder::default();
        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            8,
            8,
            image::Rgba([255, 0, 0, 0]),
        ));

        let tensor = encoder.encode(&rgba).unwrap();
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-3);
        assert!(tensor[[0, 1, 0, 0]].abs() < 1e-3);
    }

    #[test]
    fn test_custom_input_size() {
        let encoder = TensorEncoder::new(32, FilterType::Triangle);
        let img = solid_image(100, 60, [0, 255, 0]);

        let tensor = encoder.encode_rgb(&img).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 32, 32]);
    }
}
