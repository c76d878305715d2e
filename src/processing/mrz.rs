// Machine Readable Zone location and name parsing.
// Works on normalized OCR text, so both MRZ lines arrive on one line and
// filler characters may already be collapsed.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::{MrzCandidate, NormalizedText, NOT_FOUND};

lazy_static! {
    // A `P<` token, or a long run over the MRZ alphabet (TD3 lines are 44 wide)
    static ref MRZ_FRAGMENT: Regex = Regex::new(r"P<[^ ]+|[A-Z0-9<]{40,}").unwrap();

    // TD3 line 1: `P<`, issuing state (`<` padded, e.g. `D<<`), surname, `<<` (one stray `<`
    // tolerated), given names. `<` inside a group only separates alphabetic components,
    // so trailing filler is left out.
    static ref MRZ_NAME: Regex =
        Regex::new(r"P<[A-Z<]{3}([A-Z]+(?:<[A-Z]+)*)<<<?([A-Z]+(?:<[A-Z]+)*)").unwrap();
}

/// Collect every MRZ-looking fragment in document order and join them with
/// single spaces. Returns an empty candidate when nothing qualifies.
pub fn locate_mrz(text: &NormalizedText) -> MrzCandidate {
    let fragments: Vec<&str> = MRZ_FRAGMENT
        .find_iter(text.as_str())
        .map(|m| m.as_str())
        .collect();

    debug!("MRZ fragments found: {}", fragments.len());
    MrzCandidate::new(fragments.join(" "))
}

/// Holder name as `"<given names> <surname>"` in title case, or `None` when
/// the candidate has no well-formed name field.
pub fn name_from_mrz(mrz: &MrzCandidate) -> Option<String> {
    let captures = MRZ_NAME.captures(mrz.as_str())?;
    let surname = mrz_name_part(captures.get(1)?.as_str());
    let given_names = mrz_name_part(captures.get(2)?.as_str());
    Some(format!("{} {}", given_names, surname).trim().to_string())
}

/// [`name_from_mrz`] with the `N/A` sentinel for a miss.
///
/// Normalized text never keeps a `<<` separator, so for candidates located by
/// [`locate_mrz`] this is usually `N/A` and the name is left to the reviewer.
pub fn resolve_name(mrz: &MrzCandidate) -> String {
    name_from_mrz(mrz).unwrap_or_else(|| NOT_FOUND.to_string())
}

fn mrz_name_part(raw: &str) -> String {
    raw.replace('<', " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::normalizer::normalize_text;

    #[test]
    fn test_name_from_td3_line() {
        let mrz = MrzCandidate::new("P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<<<<");
        assert_eq!(resolve_name(&mrz), "Anna Maria Eriksson");
    }

    #[test]
    fn test_padded_issuing_state() {
        let mrz = MrzCandidate::new("P<D<<MUSTERMANN<<ERIKA<<<<<<<<<<<<<<<<<<<<<<<<<<");
        assert_eq!(resolve_name(&mrz), "Erika Mustermann");
    }

    #[test]
    fn test_normalized_mrz_leaves_name_for_review() {
        let text = normalize_text(
            "P<INDSHARMA<<RAVI<KUMAR<<<<<<<<<<<<<<<<<<<<<<<<\nZ1234567<6IND8001014M3001012<<<<<<<<<<<<<<04",
        );
        let mrz = locate_mrz(&text);
        assert!(!mrz.is_empty());
        assert_eq!(resolve_name(&mrz), NOT_FOUND);
    }

    #[test]
    fn test_compound_surname() {
        let mrz = MrzCandidate::new("P<MEXCHAIREZ<DE<LA<CRUZ<<DULCE<IVONNE<<<<<<<<<<");
        assert_eq!(resolve_name(&mrz), "Dulce Ivonne Chairez De La Cruz");
    }

    #[test]
    fn test_extra_separator_tolerated() {
        let mrz = MrzCandidate::new("P<UTOERIKSSON<<<ANNA<<<<");
        assert_eq!(resolve_name(&mrz), "Anna Eriksson");
    }

    #[test]
    fn test_missing_separator_is_not_found() {
        let mrz = MrzCandidate::new("P<UTOERIKSSON<ANNA<MARIA<");
        assert_eq!(resolve_name(&mrz), NOT_FOUND);
    }

    #[test]
    fn test_empty_candidate_is_not_found() {
        assert_eq!(resolve_name(&MrzCandidate::default()), NOT_FOUND);
    }

    #[test]
    fn test_locate_joins_fragments_in_order() {
        let text = normalize_text(
            "Republic of Utopia\nP<UTOERIKSSON<ANNA\nL898902C36UTO7408122F1204159ZE184226B0000010\n",
        );
        let mrz = locate_mrz(&text);
        assert_eq!(
            mrz.as_str(),
            "P<UTOERIKSSON<ANNA L898902C36UTO7408122F1204159ZE184226B0000010"
        );
    }

    #[test]
    fn test_short_runs_are_ignored() {
        let text = normalize_text("PASSPORT NO P1234567 DATE OF BIRTH 12/05/1990");
        assert!(locate_mrz(&text).is_empty());
    }
}
