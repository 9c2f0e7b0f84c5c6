//! Patient search for the booking form's autocomplete.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }

    fn matches(&self, needle_lower: &str, needle_raw: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.lastname.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
            || self.phone.contains(needle_raw)
    }
}

/// Patients whose name, last name or email contains `query` (case-insensitive)
/// or whose phone contains it verbatim.
///
/// A blank query yields no suggestions rather than the whole list.
pub fn filter_patients<'a>(patients: &'a [Patient], query: &str) -> Vec<&'a Patient> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    patients
        .iter()
        .filter(|p| p.matches(&needle, query))
        .collect()
}
