use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::utils::PassportError;

/// Marker stored in a field the extractor could not resolve.
pub const NOT_FOUND: &str = "N/A";

/// The six fields of a scanned passport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    PassportNumber,
    Code,
    DateOfBirth,
    DateOfIssue,
    DateOfExpiry,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::PassportNumber,
        Field::Code,
        Field::DateOfBirth,
        Field::DateOfIssue,
        Field::DateOfExpiry,
    ];

    /// Human facing label, as shown in the review form.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::PassportNumber => "Passport Number",
            Field::Code => "Code",
            Field::DateOfBirth => "Date of Birth",
            Field::DateOfIssue => "Date of Issue",
            Field::DateOfExpiry => "Date of Expiry",
        }
    }

    /// Key used in the upload payload.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::PassportNumber => "passport_number",
            Field::Code => "code",
            Field::DateOfBirth => "date_of_birth",
            Field::DateOfIssue => "date_of_issue",
            Field::DateOfExpiry => "date_of_expiry",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = PassportError;

    /// Accepts either the label or the payload key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|field| {
                field.label().eq_ignore_ascii_case(wanted) || field.key().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PassportError::InvalidCorrection(format!("unknown field '{}'", wanted)))
    }
}

/// Structured result of one scanned document.
///
/// Every field is always populated; unresolved ones hold [`NOT_FOUND`].
/// Serializes to exactly the six payload keys the upload endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportRecord {
    pub name: String,
    pub passport_number: String,
    pub code: String,
    pub date_of_birth: String,
    pub date_of_issue: String,
    pub date_of_expiry: String,
}

impl Default for PassportRecord {
    fn default() -> Self {
        PassportRecord {
            name: NOT_FOUND.to_string(),
            passport_number: NOT_FOUND.to_string(),
            code: NOT_FOUND.to_string(),
            date_of_birth: NOT_FOUND.to_string(),
            date_of_issue: NOT_FOUND.to_string(),
            date_of_expiry: NOT_FOUND.to_string(),
        }
    }
}

impl PassportRecord {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::PassportNumber => &self.passport_number,
            Field::Code => &self.code,
            Field::DateOfBirth => &self.date_of_birth,
            Field::DateOfIssue => &self.date_of_issue,
            Field::DateOfExpiry => &self.date_of_expiry,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::PassportNumber => &mut self.passport_number,
            Field::Code => &mut self.code,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::DateOfIssue => &mut self.date_of_issue,
            Field::DateOfExpiry => &mut self.date_of_expiry,
        };
        *slot = value.into();
    }

    pub fn is_resolved(&self, field: Field) -> bool {
        self.get(field) != NOT_FOUND
    }

    /// Fields in review-form order, paired with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.iter().map(move |field| (*field, self.get(*field)))
    }

    /// View that serializes with display labels as keys, in review-form order.
    pub fn labeled(&self) -> LabeledRecord<'_> {
        LabeledRecord(self)
    }

    pub fn unresolved(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|field| !self.is_resolved(*field))
            .collect()
    }
}

/// See [`PassportRecord::labeled`].
pub struct LabeledRecord<'a>(&'a PassportRecord);

impl Serialize for LabeledRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for (field, value) in self.0.fields() {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}
