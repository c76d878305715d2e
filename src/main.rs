// Passport scanner command line
// Scan a passport image or PDF, review the extracted fields and optionally upload them

use clap::Parser;
use passport_scan::{
    processing::OcrConfig,
    review::{apply_corrections, Correction},
    utils::PassportError,
    HttpUploadSink, PassportScanner, ScanOutcome, ScannerConfig, UploadSink,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "passport-scan", version, about = "Extract passport fields from an image or PDF")]
struct Args {
    /// Passport image (jpg, png, ...) or PDF
    #[arg(required_unless_present = "text_file")]
    file: Option<PathBuf>,

    /// Extract from this OCR text instead of scanning FILE
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Correct a field before upload, e.g. --set "name=Anna Maria Eriksson"
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    corrections: Vec<Correction>,

    /// Spreadsheet endpoint; the reviewed record is POSTed here when given
    #[arg(long)]
    endpoint: Option<String>,

    /// pdftoppm binary used to rasterize PDFs
    #[arg(long, default_value = "pdftoppm")]
    pdftoppm: PathBuf,

    /// Rasterization resolution for PDFs
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Tesseract tessdata directory
    #[arg(long)]
    tessdata: Option<PathBuf>,

    /// Tesseract language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Print the raw OCR text to stderr
    #[arg(long)]
    show_text: bool,
}

impl Args {
    fn config(&self) -> ScannerConfig {
        ScannerConfig {
            pdftoppm: self.pdftoppm.clone(),
            dpi: self.dpi,
            ocr: OcrConfig {
                language: self.lang.clone(),
                tessdata: self.tessdata.clone(),
                ..OcrConfig::default()
            },
        }
    }
}

#[cfg(feature = "tesseract")]
fn scan_file(path: &Path, config: &ScannerConfig) -> Result<ScanOutcome, PassportError> {
    let ocr = passport_scan::processing::TesseractOcr::new(config.ocr.clone());
    PassportScanner::new(ocr, config).scan_file(path)
}

#[cfg(not(feature = "tesseract"))]
fn scan_file(path: &Path, config: &ScannerConfig) -> Result<ScanOutcome, PassportError> {
    PassportScanner::new(passport_scan::processing::UnavailableOcr, config).scan_file(path)
}

fn run(args: Args) -> Result<(), PassportError> {
    let outcome = match (&args.text_file, &args.file) {
        (Some(text_file), _) => ScanOutcome::from_text(std::fs::read_to_string(text_file)?),
        (None, Some(file)) => scan_file(file, &args.config())?,
        (None, None) => unreachable!("clap requires FILE unless --text-file is given"),
    };

    if args.show_text {
        eprintln!("{}", outcome.raw_text);
    }

    let record = apply_corrections(outcome.record, &args.corrections);

    let json = serde_json::to_string_pretty(&record.labeled())
        .map_err(|e| PassportError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    println!("{}", json);

    if let Some(endpoint) = &args.endpoint {
        HttpUploadSink::new(endpoint.clone()).submit(&record)?;
        eprintln!("Uploaded to {}", endpoint);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error scanning passport: {}", err);
            ExitCode::FAILURE
        }
    }
}
