pub mod record;
pub mod text;

pub use record::{Field, LabeledRecord, PassportRecord, NOT_FOUND};
pub use text::{MrzCandidate, NormalizedText};
