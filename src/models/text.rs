use std::fmt;

/// OCR text after newline folding, filler collapsing and uppercasing.
///
/// Only built by [`crate::processing::normalizer::normalize_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub(crate) fn from_normalized(text: String) -> Self {
        NormalizedText(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Space-joined MRZ-looking fragments of a document. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MrzCandidate(String);

impl MrzCandidate {
    pub fn new(text: impl Into<String>) -> Self {
        MrzCandidate(text.into())
    }

    pub const fn empty() -> Self {
        MrzCandidate(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MrzCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
