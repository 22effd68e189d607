//! Profile sub-document types (work history and education).
//!
//! Both lists are stored as JSONB arrays on the `profiles` row and replaced
//! wholesale on update, so the order supplied by the client is preserved.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum bio length, in characters.
pub const MAX_BIO_LENGTH: usize = 2000;

/// Maximum headline (current position) length, in characters.
pub const MAX_POSITION_LENGTH: usize = 200;

/// Maximum number of entries in either list.
pub const MAX_PROFILE_ENTRIES: usize = 50;

/// One past or current position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    pub company: Option<String>,
    pub position: Option<String>,
    pub years: Option<String>,
}

/// One education record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
}

fn clean(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl WorkEntry {
    fn normalized(self) -> Option<Self> {
        let entry = WorkEntry {
            company: clean(self.company),
            position: clean(self.position),
            years: clean(self.years),
        };
        (entry != WorkEntry::default()).then_some(entry)
    }
}

impl EducationEntry {
    fn normalized(self) -> Option<Self> {
        let entry = EducationEntry {
            school: clean(self.school),
            degree: clean(self.degree),
            field_of_study: clean(self.field_of_study),
        };
        (entry != EducationEntry::default()).then_some(entry)
    }
}

/// Trim every field and drop entries that end up completely blank.
pub fn normalize_work(entries: Vec<WorkEntry>) -> Result<Vec<WorkEntry>, CoreError> {
    let entries: Vec<_> = entries.into_iter().filter_map(WorkEntry::normalized).collect();
    check_entry_count(entries.len(), "past_work")?;
    Ok(entries)
}

/// Same as [`normalize_work`] for education entries.
pub fn normalize_education(
    entries: Vec<EducationEntry>,
) -> Result<Vec<EducationEntry>, CoreError> {
    let entries: Vec<_> = entries
        .into_iter()
        .filter_map(EducationEntry::normalized)
        .collect();
    check_entry_count(entries.len(), "education")?;
    Ok(entries)
}

fn check_entry_count(len: usize, field: &str) -> Result<(), CoreError> {
    if len > MAX_PROFILE_ENTRIES {
        return Err(CoreError::Validation(format!(
            "{field} may contain at most {MAX_PROFILE_ENTRIES} entries"
        )));
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(CoreError::Validation(format!(
            "Bio must be at most {MAX_BIO_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Length is counted after trimming, as stored.
pub fn validate_position(position: &str) -> Result<(), CoreError> {
    if position.trim().chars().count() > MAX_POSITION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Current position must be at most {MAX_POSITION_LENGTH} characters"
        )));
    }
    Ok(())
}
