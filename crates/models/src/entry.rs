use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A dated note attached to a pet.
///
/// `date` is free text; nothing checks that it names a real calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub description: String,
}

impl Entry {
    pub fn new(date: impl Into<String>, description: impl Into<String>) -> Result<Self, ModelError> {
        let date = date.into();
        let description = description.into();
        if date.is_empty() {
            return Err(ModelError::Validation("date"));
        }
        if description.is_empty() {
            return Err(ModelError::Validation("description"));
        }
        Ok(Self { date, description })
    }
}

/// Today's local date as `YYYY-MM-DD`, the value new entries are pre-filled with.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Which of a pet's three journals an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    HealthRecord,
    Vaccination,
    Appointment,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::HealthRecord, EntryKind::Vaccination, EntryKind::Appointment];

    /// Human-readable label, e.g. `"Health Record"`.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::HealthRecord => "Health Record",
            EntryKind::Vaccination => "Vaccination",
            EntryKind::Appointment => "Appointment",
        }
    }

    /// Name of the JSON array holding entries of this kind.
    pub fn field(&self) -> &'static str {
        match self {
            EntryKind::HealthRecord => "health_records",
            EntryKind::Vaccination => "vaccinations",
            EntryKind::Appointment => "appointments",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "_");
        match normalized.as_str() {
            "health_record" | "health_records" => Ok(EntryKind::HealthRecord),
            "vaccination" | "vaccinations" => Ok(EntryKind::Vaccination),
            "appointment" | "appointments" => Ok(EntryKind::Appointment),
            _ => Err(ModelError::UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_requires_date_and_description() {
        assert_eq!(Entry::new("", "rabies").unwrap_err(), ModelError::Validation("date"));
        assert_eq!(Entry::new("2024-01-01", "").unwrap_err(), ModelError::Validation("description"));
        let e = Entry::new("2024-01-01", "rabies").unwrap();
        assert_eq!(e.date, "2024-01-01");
    }

    #[test]
    fn entry_date_is_not_calendar_checked() {
        assert!(Entry::new("next tuesday", "checkup").is_ok());
    }

    #[test]
    fn kind_parses_labels_and_field_stems() {
        assert_eq!("Health Record".parse::<EntryKind>().unwrap(), EntryKind::HealthRecord);
        assert_eq!("vaccination".parse::<EntryKind>().unwrap(), EntryKind::Vaccination);
        assert_eq!(" APPOINTMENTS ".parse::<EntryKind>().unwrap(), EntryKind::Appointment);
        assert!(matches!("grooming".parse::<EntryKind>(), Err(ModelError::UnknownKind(_))));
    }

    #[test]
    fn today_is_iso_formatted() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_ok());
    }
}
