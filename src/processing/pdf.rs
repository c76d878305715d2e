use crate::utils::PassportError;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    /// Sniff the leading bytes; anything that is not a PDF is handed to the image decoder.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(PDF_MAGIC) {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        }
    }
}

/// Renders the first page of a PDF to PNG bytes with poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    pdftoppm: PathBuf,
    dpi: u32,
}

impl PdfRasterizer {
    pub fn new(pdftoppm: PathBuf, dpi: u32) -> Self {
        Self { pdftoppm, dpi }
    }

    pub fn first_page(&self, pdf_data: &[u8]) -> Result<Vec<u8>, PassportError> {
        let work_dir = tempfile::tempdir()
            .map_err(|e| PassportError::PdfRasterizationError(format!("Failed to create temp dir: {}", e)))?;
        let pdf_path = work_dir.path().join("document.pdf");
        fs::write(&pdf_path, pdf_data)?;

        // -singlefile writes `<prefix>.png` without a page suffix
        let prefix = work_dir.path().join("page");
        info!("Rasterizing first PDF page at {} dpi", self.dpi);
        let output = Command::new(&self.pdftoppm)
            .arg("-png")
            .arg("-singlefile")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg("1")
            .arg(&pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|e| {
                PassportError::PdfRasterizationError(format!(
                    "Failed to invoke {}: {}; is poppler-utils installed?",
                    self.pdftoppm.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(PassportError::PdfRasterizationError(format!(
                "pdftoppm failed with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let page_path = prefix.with_extension("png");
        let page = fs::read(&page_path).map_err(|e| {
            PassportError::PdfRasterizationError(format!(
                "Expected rendered page not found at {}: {}",
                page_path.display(),
                e
            ))
        })?;
        debug!("Rendered page is {} bytes", page.len());
        Ok(page)
    }
}
