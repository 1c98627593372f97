//! Patient record and demographics.
//!
//! A patient's identifier is fixed at construction because the registry indexes
//! patients by it. Demographics are taken from the first tabular row that names the
//! patient; later rows only contribute visits.

use super::{Note, Visit};
use chrono::NaiveDate;
use serde::Serialize;

/// Demographic attributes captured for a patient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Demographics {
    pub gender: String,
    pub race: String,
    pub age: u32,
    pub ethnicity: String,
    pub insurance: String,
    pub zip_code: String,
}

/// A patient with their visit history and clinical notes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patient {
    patient_id: String,
    #[serde(flatten)]
    demographics: Demographics,
    visits: Vec<Visit>,
    notes: Vec<Note>,
}

impl Patient {
    /// Creates a patient with no visits or notes.
    pub fn new(patient_id: impl Into<String>, demographics: Demographics) -> Self {
        Self {
            patient_id: patient_id.into(),
            demographics,
            visits: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    /// Visits in the order they were added.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn add_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    pub fn add_note(&mut self, note_id: impl Into<String>, note_type: impl Into<String>) {
        self.notes.push(Note::new(note_id, note_type));
    }

    /// Removes the first note with `note_id`. Returns whether a note was removed.
    pub fn remove_note(&mut self, note_id: &str) -> bool {
        match self.notes.iter().position(|n| n.note_id == note_id) {
            Some(index) => {
                self.notes.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of this patient's visits that fall on `date`.
    pub fn visits_on(&self, date: NaiveDate) -> usize {
        self.visits.iter().filter(|v| v.occurred_on(date)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn patient() -> Patient {
        Patient::new(
            "P1",
            Demographics {
                gender: "F".into(),
                race: "Asian".into(),
                age: 42,
                ethnicity: "Non-Hispanic".into(),
                insurance: "Medicare".into(),
                zip_code: "02139".into(),
            },
        )
    }

    #[test]
    fn visits_keep_insertion_order() {
        let mut p = patient();
        p.add_visit(Visit::new("V2", date("2024-01-06"), "ER", "follow-up"));
        p.add_visit(Visit::new("V1", date("2024-01-05"), "ER", "chest pain"));

        let ids: Vec<&str> = p.visits().iter().map(Visit::visit_id).collect();
        assert_eq!(ids, ["V2", "V1"]);
    }

    #[test]
    fn remove_note_removes_only_first_match() {
        let mut p = patient();
        p.add_note("N1", "progress");
        p.add_note("N1", "discharge");
        p.add_note("N2", "consult");

        assert!(p.remove_note("N1"));
        assert_eq!(p.notes().len(), 2);
        assert_eq!(p.notes()[0].note_type, "discharge");

        assert!(!p.remove_note("N9"));
        assert_eq!(p.notes().len(), 2);
    }

    #[test]
    fn visits_on_matches_calendar_date() {
        let mut p = patient();
        p.add_visit(Visit::new("V1", date("2024-01-05"), "ER", "chest pain"));
        p.add_visit(Visit::new("V2", date("2024-01-05"), "ER", "follow-up"));
        p.add_visit(Visit::new("V3", date("2024-01-06"), "ICU", "trauma"));

        assert_eq!(p.visits_on(date("2024-01-05")), 2);
        assert_eq!(p.visits_on(date("2024-01-06")), 1);
        assert_eq!(p.visits_on(date("2023-12-31")), 0);
    }

    #[test]
    fn serialises_demographics_inline() {
        let p = patient();
        let json = serde_json::to_value(&p).expect("serialise patient");
        assert_eq!(json["patient_id"], "P1");
        assert_eq!(json["age"], 42);
        assert_eq!(json["zip_code"], "02139");
        assert!(json["visits"].as_array().unwrap().is_empty());
    }
}
