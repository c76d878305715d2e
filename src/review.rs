// Human review stage: operator corrections applied to an extracted record
// before it is uploaded.

use std::str::FromStr;

use log::info;

use crate::models::{Field, PassportRecord};
use crate::utils::PassportError;

/// One edited field, e.g. `name=Anna Maria Eriksson` or `Date of Birth=12/08/1974`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub field: Field,
    pub value: String,
}

impl FromStr for Correction {
    type Err = PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s.split_once('=').ok_or_else(|| {
            PassportError::InvalidCorrection(format!("expected FIELD=VALUE, got '{}'", s))
        })?;
        Ok(Correction {
            field: field.parse()?,
            value: value.trim().to_string(),
        })
    }
}

/// Apply corrections in order; a later edit of the same field wins.
pub fn apply_corrections(mut record: PassportRecord, corrections: &[Correction]) -> PassportRecord {
    for correction in corrections {
        if record.get(correction.field) != correction.value {
            info!(
                "Reviewer changed {} from '{}' to '{}'",
                correction.field,
                record.get(correction.field),
                correction.value
            );
        }
        record.set(correction.field, correction.value.clone());
    }
    record
}
