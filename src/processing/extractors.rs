// Field extraction over normalized OCR text.
// Each field is resolved by an ordered chain of strategies; the first one
// that yields a value wins and a miss anywhere only affects that field.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::models::{Field, MrzCandidate, NormalizedText, PassportRecord, NOT_FOUND};
use crate::processing::mrz::{locate_mrz, resolve_name};
use crate::processing::normalizer::normalize_text;

lazy_static! {
    static ref PASSPORT_NUMBER: Regex = Regex::new(r"\b([A-Z][0-9]{7,8})\b").unwrap();

    static ref NATIONALITY_LABEL: Regex =
        Regex::new(r"(?:NATIONALITY|COUNTRY CODE)[:\s]*([A-Z]{3})").unwrap();
    static ref MRZ_ISSUING_STATE: Regex = Regex::new(r"^P<([A-Z]{3})").unwrap();

    static ref DATE_TOKEN: Regex = Regex::new(r"[0-9]{2}[/-][0-9]{2}[/-][0-9]{4}").unwrap();
    static ref DOB_LABEL: Regex = Regex::new(
        r"(?i)(?:DATE OF BIRTH|DOB|BIRTH DATE)[:\s-]*([0-9]{2}[/-][0-9]{2}[/-][0-9]{4})"
    ).unwrap();
    static ref DOI_LABEL: Regex =
        Regex::new(r"DATE OF ISSUE[:\s]*([0-9]{2}[/-][0-9]{2}[/-][0-9]{4})").unwrap();
    static ref DOE_LABEL: Regex =
        Regex::new(r"DATE OF EXPIRY[:\s]*([0-9]{2}[/-][0-9]{2}[/-][0-9]{4})").unwrap();
}

// Stand-in for resolvers that never look at the MRZ.
static NO_MRZ: MrzCandidate = MrzCandidate::empty();

/// Everything the resolvers read, computed once per document.
pub struct ExtractionContext<'a> {
    pub text: &'a NormalizedText,
    pub mrz: &'a MrzCandidate,
    /// Every date-shaped token in document order.
    pub dates: Vec<String>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(text: &'a NormalizedText, mrz: &'a MrzCandidate) -> Self {
        ExtractionContext {
            text,
            mrz,
            dates: date_tokens(text),
        }
    }
}

/// A single resolution attempt for one field.
pub type Strategy<'s> = &'s dyn Fn(&ExtractionContext) -> Option<String>;

/// Named tier in a resolution chain. The name only shows up in debug logs.
pub type Tier<'s> = (&'static str, Strategy<'s>);

/// Try each tier in order and return the first value found.
pub fn first_resolved(field: Field, ctx: &ExtractionContext, tiers: &[Tier]) -> String {
    for (tier, strategy) in tiers {
        if let Some(value) = strategy(ctx) {
            debug!("{} resolved by {}: {}", field, tier, value);
            return value;
        }
    }
    warn!("{} not found", field);
    NOT_FOUND.to_string()
}

// Passport number

/// First standalone letter + 7 or 8 digits token anywhere in the text.
pub fn resolve_passport_number(text: &NormalizedText) -> String {
    match capture(&PASSPORT_NUMBER, text.as_str()) {
        Some(number) => {
            debug!("{} resolved by printed number: {}", Field::PassportNumber, number);
            number
        }
        None => {
            warn!("{} not found", Field::PassportNumber);
            NOT_FOUND.to_string()
        }
    }
}

// Country code

fn labeled_country_code(ctx: &ExtractionContext) -> Option<String> {
    capture(&NATIONALITY_LABEL, ctx.text.as_str())
}

fn mrz_issuing_state(ctx: &ExtractionContext) -> Option<String> {
    capture(&MRZ_ISSUING_STATE, ctx.mrz.as_str())
}

// Matches anywhere, "INDIA" and "INDIAN" included. Kept to this one code.
fn india_substring(ctx: &ExtractionContext) -> Option<String> {
    ctx.text.as_str().contains("IND").then(|| "IND".to_string())
}

fn country_code_from(ctx: &ExtractionContext) -> String {
    first_resolved(
        Field::Code,
        ctx,
        &[
            ("nationality label", &labeled_country_code),
            ("MRZ issuing state", &mrz_issuing_state),
            ("IND substring", &india_substring),
        ],
    )
}

/// Labeled nationality, then MRZ issuing state, then the `IND` substring.
pub fn resolve_country_code(text: &NormalizedText, mrz: &MrzCandidate) -> String {
    country_code_from(&ExtractionContext::new(text, mrz))
}

// Dates

fn date_tokens(text: &NormalizedText) -> Vec<String> {
    DATE_TOKEN
        .find_iter(text.as_str())
        .map(|m| m.as_str().to_string())
        .collect()
}

fn labeled_date(label: &'static Regex) -> impl Fn(&ExtractionContext) -> Option<String> {
    move |ctx: &ExtractionContext| capture(label, ctx.text.as_str())
}

/// Best-effort guess relying on passports printing birth, issue and expiry
/// dates in that order. `index` is zero-based into the document's date tokens.
pub fn positional_date_fallback(index: usize) -> impl Fn(&ExtractionContext) -> Option<String> {
    move |ctx: &ExtractionContext| ctx.dates.get(index).cloned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDates {
    pub birth: String,
    pub issue: String,
    pub expiry: String,
}

fn dates_from(ctx: &ExtractionContext) -> ResolvedDates {
    let resolve = |field: Field, label: &'static Regex, position: usize| {
        let labeled = labeled_date(label);
        let positional = positional_date_fallback(position);
        first_resolved(field, ctx, &[("label", &labeled), ("position", &positional)])
    };

    ResolvedDates {
        birth: resolve(Field::DateOfBirth, &*DOB_LABEL, 0),
        issue: resolve(Field::DateOfIssue, &*DOI_LABEL, 1),
        expiry: resolve(Field::DateOfExpiry, &*DOE_LABEL, 2),
    }
}

/// Birth, issue and expiry dates: labeled match first, document position second.
pub fn resolve_dates(text: &NormalizedText) -> ResolvedDates {
    dates_from(&ExtractionContext::new(text, &NO_MRZ))
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Turns raw OCR output into a [`PassportRecord`]. Never fails: anything it
/// cannot find is left as `N/A`.
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(raw_text: &str) -> PassportRecord {
        Self::extract_normalized(&normalize_text(raw_text))
    }

    pub fn extract_normalized(text: &NormalizedText) -> PassportRecord {
        let mrz = locate_mrz(text);
        debug!("MRZ candidate: {:?}", mrz.as_str());

        let ctx = ExtractionContext::new(text, &mrz);
        let dates = dates_from(&ctx);

        let record = PassportRecord {
            name: resolve_name(&mrz),
            passport_number: resolve_passport_number(text),
            code: country_code_from(&ctx),
            date_of_birth: dates.birth,
            date_of_issue: dates.issue,
            date_of_expiry: dates.expiry,
        };

        info!(
            "Extracted passport record, {} of {} fields resolved",
            Field::ALL.len() - record.unresolved().len(),
            Field::ALL.len()
        );
        record
    }
}
