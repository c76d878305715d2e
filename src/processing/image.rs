use crate::utils::PassportError;
use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use imageproc::filter::median_filter;
use log::debug;
use std::io::Cursor;
use std::path::Path;

const CONTRAST_FACTOR: f32 = 2.0;

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn process_image(image_path: &Path) -> Result<Vec<u8>, PassportError> {
        let img = image::open(image_path)
            .map_err(|e| PassportError::ImageProcessingError(format!("Failed to open image: {}", e)))?;
        Self::encode_png(Self::preprocess_image(&img))
    }

    /// Decode an encoded image (JPEG, PNG, ...) and return OCR-ready PNG bytes.
    pub fn process_bytes(image_data: &[u8]) -> Result<Vec<u8>, PassportError> {
        let img = image::load_from_memory(image_data)
            .map_err(|e| PassportError::ImageProcessingError(format!("Failed to decode image: {}", e)))?;
        Self::encode_png(Self::preprocess_image(&img))
    }

    fn preprocess_image(img: &DynamicImage) -> GrayImage {
        // Convert to grayscale
        let gray = img.to_luma8();
        debug!("Preprocessing {}x{} image", gray.width(), gray.height());

        // 3x3 median to drop speckle noise
        let denoised = median_filter(&gray, 1, 1);

        Self::enhance_contrast(&denoised, CONTRAST_FACTOR)
    }

    // Push every pixel away from the image mean by `factor`.
    fn enhance_contrast(img: &GrayImage, factor: f32) -> GrayImage {
        let pixel_count = (img.width() as u64 * img.height() as u64).max(1);
        let sum: u64 = img.pixels().map(|p| p[0] as u64).sum();
        let mean = (sum as f32 / pixel_count as f32).round();

        let mut enhanced = img.clone();
        for pixel in enhanced.pixels_mut() {
            let value = mean + factor * (pixel[0] as f32 - mean);
            *pixel = Luma([value.round().clamp(0.0, 255.0) as u8]);
        }
        enhanced
    }

    fn encode_png(img: GrayImage) -> Result<Vec<u8>, PassportError> {
        let mut buffer = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)
            .map_err(|e| PassportError::ImageProcessingError(format!("Failed to encode image: {}", e)))?;
        Ok(buffer)
    }
}
