use crate::models::NormalizedText;

/// Fold raw OCR output into the single-line uppercase form the field
/// patterns run against.
///
/// Newlines become spaces, `<<` becomes `<` until none is left, and the
/// result is uppercased. Nothing else is touched, so the function is total
/// and normalizing twice is the same as normalizing once.
pub fn normalize_text(raw: &str) -> NormalizedText {
    let mut text = raw.replace('\n', " ");
    while text.contains("<<") {
        text = text.replace("<<", "<");
    }
    NormalizedText::from_normalized(text.to_uppercase())
}
