use serde::Serialize;

/// Reference to a clinical note attached to a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Note {
    pub note_id: String,
    pub note_type: String,
}

impl Note {
    pub fn new(note_id: impl Into<String>, note_type: impl Into<String>) -> Self {
        Self {
            note_id: note_id.into(),
            note_type: note_type.into(),
        }
    }
}
