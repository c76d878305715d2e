use thiserror::Error;

/// Failures of the external collaborators around the field extractor.
///
/// Field-level no-match results are never errors; they resolve to
/// [`crate::models::NOT_FOUND`] instead.
#[derive(Debug, Error)]
pub enum PassportError {
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("PDF rasterization error: {0}")]
    PdfRasterizationError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("OCR engine not available, build with the `tesseract` feature or pass --text-file")]
    OcrUnavailable,
    #[error("Upload error: {0}")]
    UploadError(String),
    #[error("Upload rejected by endpoint with status {status}")]
    UploadRejected { status: u16 },
    #[error("Invalid correction: {0}")]
    InvalidCorrection(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
