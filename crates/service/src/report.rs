//! Plain-text views of a pet for display.

use models::{EntryKind, Pet};

/// Display order of the journals in a full report.
const SECTIONS: [(EntryKind, &str); 3] = [
    (EntryKind::Vaccination, "Vaccinations"),
    (EntryKind::HealthRecord, "Health Records"),
    (EntryKind::Appointment, "Appointments"),
];

/// One-line summary, e.g. `Rex (lab) - 3 yrs`.
pub fn pet_card(pet: &Pet) -> String {
    format!("{} ({}) - {} yrs", pet.name, pet.breed, pet.age)
}

/// Every journal of `pet`, vaccinations first. Empty journals read `None`.
pub fn pet_report(pet: &Pet) -> String {
    let mut lines = vec![pet.name.clone(), format!("Weight: {} | Age: {}", pet.weight, pet.age)];
    for (kind, title) in SECTIONS {
        lines.push(String::new());
        lines.push(format!("--- {} ---", title));
        let entries = pet.entries(kind);
        if entries.is_empty() {
            lines.push("None".to_string());
        }
        lines.extend(entries.iter().map(|e| format!("[{}] {}", e.date, e.description)));
    }
    lines.join("\n")
}
