use crate::models::PassportRecord;
use crate::processing::{
    DocumentKind, FieldExtractor, ImageProcessor, OcrConfig, OcrProvider, PdfRasterizer,
};
use crate::utils::PassportError;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Locations and settings of the external tools around the extractor.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub pdftoppm: PathBuf,
    pub dpi: u32,
    pub ocr: OcrConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        ScannerConfig {
            pdftoppm: PathBuf::from("pdftoppm"),
            dpi: 300,
            ocr: OcrConfig::default(),
        }
    }
}

/// Raw OCR text of the first page and the record extracted from it.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub raw_text: String,
    pub record: PassportRecord,
}

impl ScanOutcome {
    /// Extract from OCR text obtained elsewhere, skipping image handling.
    pub fn from_text(raw_text: String) -> Self {
        let record = FieldExtractor::extract(&raw_text);
        ScanOutcome { raw_text, record }
    }
}

pub struct PassportScanner<O: OcrProvider> {
    ocr: O,
    rasterizer: PdfRasterizer,
}

impl<O: OcrProvider> PassportScanner<O> {
    pub fn new(ocr: O, config: &ScannerConfig) -> Self {
        PassportScanner {
            ocr,
            rasterizer: PdfRasterizer::new(config.pdftoppm.clone(), config.dpi),
        }
    }

    pub fn scan_file(&self, path: &Path) -> Result<ScanOutcome, PassportError> {
        info!("Scanning {}", path.display());
        let data = std::fs::read(path)?;
        self.scan_bytes(&data)
    }

    // Runs the whole pipeline for one uploaded document
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanOutcome, PassportError> {
        // Step 1: Get a page bitmap, first page only for PDFs
        let page = match DocumentKind::detect(data) {
            DocumentKind::Pdf => self.rasterizer.first_page(data)?,
            DocumentKind::Image => data.to_vec(),
        };

        // Step 2: Grayscale, denoise, contrast
        let processed = ImageProcessor::process_bytes(&page)?;

        // Step 3: OCR
        let raw_text = self.ocr.recognize(&processed)?;
        debug!("OCR text:\n{}", raw_text);

        // Step 4: Field extraction never fails
        Ok(ScanOutcome::from_text(raw_text))
    }
}
