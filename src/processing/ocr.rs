use crate::utils::PassportError;
use std::path::PathBuf;

/// Settings handed to the OCR engine for every page.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub language: String,
    pub tessdata: Option<PathBuf>,
    /// Treat the page as a single uniform block of text (Tesseract PSM 6).
    pub single_block: bool,
    pub preserve_interword_spaces: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            language: "eng".to_string(),
            tessdata: None,
            single_block: true,
            preserve_interword_spaces: true,
        }
    }
}

/// Black-box OCR: preprocessed PNG bytes of one page in, raw text out.
pub trait OcrProvider {
    fn recognize(&self, image_png: &[u8]) -> Result<String, PassportError>;
}

/// Returns preset text regardless of the image. Used when the OCR output
/// is already at hand, and in tests.
pub struct StaticTextOcr {
    text: String,
}

impl StaticTextOcr {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrProvider for StaticTextOcr {
    fn recognize(&self, _image_png: &[u8]) -> Result<String, PassportError> {
        Ok(self.text.clone())
    }
}

/// Placeholder selected when the crate is built without Tesseract.
pub struct UnavailableOcr;

impl OcrProvider for UnavailableOcr {
    fn recognize(&self, _image_png: &[u8]) -> Result<String, PassportError> {
        Err(PassportError::OcrUnavailable)
    }
}

#[cfg(feature = "tesseract")]
pub use tesseract_backend::TesseractOcr;

#[cfg(feature = "tesseract")]
mod tesseract_backend {
    use super::{OcrConfig, OcrProvider};
    use crate::utils::PassportError;
    use log::debug;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tesseract::{PageSegMode, Tesseract};

    pub struct TesseractOcr {
        config: OcrConfig,
    }

    impl TesseractOcr {
        pub fn new(config: OcrConfig) -> Self {
            Self { config }
        }
    }

    impl OcrProvider for TesseractOcr {
        fn recognize(&self, image_png: &[u8]) -> Result<String, PassportError> {
            // Tesseract reads from a path, so stage the page in a temporary file
            let mut temp_file = tempfile::Builder::new()
                .suffix(".png")
                .tempfile()
                .map_err(|e| PassportError::OcrError(format!("Failed to create temp file: {}", e)))?;
            temp_file
                .write_all(image_png)
                .map_err(|e| PassportError::OcrError(format!("Failed to write to temp file: {}", e)))?;

            self.run(&temp_file)
        }
    }

    impl TesseractOcr {
        fn run(&self, page: &NamedTempFile) -> Result<String, PassportError> {
            let path_str = page
                .path()
                .to_str()
                .ok_or_else(|| PassportError::OcrError("Could not convert path to string".to_string()))?;
            let datapath = match &self.config.tessdata {
                Some(dir) => Some(dir.to_str().ok_or_else(|| {
                    PassportError::OcrError("tessdata path is not valid UTF-8".to_string())
                })?),
                None => None,
            };

            let preserve = if self.config.preserve_interword_spaces { "1" } else { "0" };
            let mut tess = Tesseract::new(datapath, Some(self.config.language.as_str()))
                .map_err(|e| PassportError::OcrError(format!("Failed to initialize Tesseract: {}", e)))?
                .set_variable("preserve_interword_spaces", preserve)
                .map_err(|e| PassportError::OcrError(format!("Failed to set Tesseract variable: {}", e)))?;

            if self.config.single_block {
                tess.set_page_seg_mode(PageSegMode::PsmSingleBlock);
            }

            let text = tess
                .set_image(path_str)
                .map_err(|e| PassportError::OcrError(format!("Failed to set image: {}", e)))?
                .get_text()
                .map_err(|e| PassportError::OcrError(format!("Failed to extract text: {}", e)))?;

            debug!("Tesseract returned {} characters", text.len());
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_text_ignores_image() {
        let ocr = StaticTextOcr::new("P<UTOERIKSSON<<ANNA");
        assert_eq!(ocr.recognize(b"png bytes").unwrap(), "P<UTOERIKSSON<<ANNA");
        assert_eq!(ocr.recognize(b"").unwrap(), "P<UTOERIKSSON<<ANNA");
    }

    #[test]
    fn test_unavailable_reports_error() {
        assert!(matches!(UnavailableOcr.recognize(b""), Err(PassportError::OcrUnavailable)));
    }

    #[test]
    fn test_default_config_matches_single_block_layout() {
        let config = OcrConfig::default();
        assert_eq!(config.language, "eng");
        assert!(config.single_block);
        assert!(config.preserve_interword_spaces);
        assert!(config.tessdata.is_none());
    }
}
