pub mod models;
pub mod processing;
pub mod review;
pub mod upload;
pub mod utils;
pub mod passport_scanner;

pub use models::{Field, LabeledRecord, PassportRecord, NOT_FOUND};
pub use passport_scanner::{PassportScanner, ScanOutcome, ScannerConfig};
pub use processing::FieldExtractor;
pub use upload::{HttpUploadSink, UploadSink};
