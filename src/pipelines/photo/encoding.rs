// SPDX-License-Identifier: GPL-3.0-only

//! Still image encoding
//!
//! Turns a viewfinder frame into JPEG or PNG bytes. Encoding is CPU-bound, so
//! the async entry point moves it onto the blocking pool.

use crate::backends::camera::types::{CameraFrame, ImageFormat};
use crate::constants::pipeline;
use crate::errors::CameraError;
use image::{RgbImage, RgbaImage};
use tracing::{debug, info};

/// Encoded image data ready for saving
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoEncoder {
    format: ImageFormat,
}

impl PhotoEncoder {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }

    /// Encode a frame on the blocking pool
    pub async fn encode(&self, frame: CameraFrame) -> Result<EncodedImage, CameraError> {
        info!(
            width = frame.width,
            height = frame.height,
            format = ?self.format,
            "Starting encoding"
        );

        let encoder = *self;
        tokio::task::spawn_blocking(move || encoder.encode_frame(&frame))
            .await
            .map_err(|e| CameraError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Encode a frame on the current thread
    pub fn encode_frame(&self, frame: &CameraFrame) -> Result<EncodedImage, CameraError> {
        let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.packed_rgba())
            .ok_or_else(|| CameraError::EncodingFailed("Frame buffer too small".to_string()))?;

        let data = match self.format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => encode_jpeg(image::DynamicImage::ImageRgba8(rgba).to_rgb8())?,
            ImageFormat::Png => encode_png(rgba)?,
        };

        debug!(size = data.len(), "Encoding complete");

        Ok(EncodedImage {
            data,
            format: self.format,
            width: frame.width,
            height: frame.height,
        })
    }
}

fn encode_jpeg(image: RgbImage) -> Result<Vec<u8>, CameraError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, pipeline::JPEG_QUALITY);

    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CameraError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}

fn encode_png(image: RgbaImage) -> Result<Vec<u8>, CameraError> {
    let mut buffer = Vec::new();

    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| CameraError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn gradient_frame(width: u32, height: u32) -> CameraFrame {
        let stride = width * 4 + 8;
        let mut data = vec![0u8; (stride * height) as usize];
        for y in 0..height {
            for x in 0..width {
                let i = (y * stride + x * 4) as usize;
                data[i] = (x * 255 / width) as u8;
                data[i + 1] = (y * 255 / height) as u8;
                data[i + 2] = 128;
                data[i + 3] = 255;
            }
        }
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_jpeg_output_is_decodable() {
        let encoded = PhotoEncoder::new(ImageFormat::Jpeg)
            .encode_frame(&gradient_frame(32, 24))
            .unwrap();
        assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_png_keeps_dimensions() {
        let encoded = PhotoEncoder::new(ImageFormat::Png)
            .encode_frame(&gradient_frame(17, 9))
            .unwrap();
        assert_eq!(encoded.format, ImageFormat::Png);
        assert_eq!(&encoded.data[1..4], b"PNG");
        assert_eq!((encoded.width, encoded.height), (17, 9));
    }

    #[test]
    fn test_short_buffer_is_an_error() {
        let frame = CameraFrame {
            width: 10,
            height: 10,
            stride: 40,
            data: Arc::from(vec![0u8; 40]),
            captured_at: Instant::now(),
        };
        let result = PhotoEncoder::default().encode_frame(&frame);
        assert!(matches!(result, Err(CameraError::EncodingFailed(_))));
    }
}
