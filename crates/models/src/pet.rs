use serde::{Deserialize, Deserializer, Serialize};

use crate::entry::{Entry, EntryKind};
use crate::errors::ModelError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub name: String,
    pub breed: String,
    pub age: String,
    pub weight: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub health_records: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vaccinations: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub appointments: Vec<Entry>,
}

/// A journal stored as `null` reads as an empty journal.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Pet {
    /// Build a pet with empty journals. Only the name is mandatory; breed,
    /// age and weight are stored exactly as entered.
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: impl Into<String>,
        weight: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::Validation("name"));
        }
        Ok(Self {
            name,
            breed: breed.into(),
            age: age.into(),
            weight: weight.into(),
            health_records: Vec::new(),
            vaccinations: Vec::new(),
            appointments: Vec::new(),
        })
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::HealthRecord => &self.health_records,
            EntryKind::Vaccination => &self.vaccinations,
            EntryKind::Appointment => &self.appointments,
        }
    }

    pub fn entries_mut(&mut self, kind: EntryKind) -> &mut Vec<Entry> {
        match kind {
            EntryKind::HealthRecord => &mut self.health_records,
            EntryKind::Vaccination => &mut self.vaccinations,
            EntryKind::Appointment => &mut self.appointments,
        }
    }
}
