pub mod extractors;
pub mod image;
pub mod mrz;
pub mod normalizer;
pub mod ocr;
pub mod pdf;

pub use extractors::FieldExtractor;
pub use image::ImageProcessor;
pub use ocr::{OcrConfig, OcrProvider, StaticTextOcr, UnavailableOcr};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcr;
pub use pdf::{DocumentKind, PdfRasterizer};
