use chrono::NaiveDate;
use serde::Serialize;

/// One clinical encounter for a patient on a given date.
///
/// Fields are only readable once constructed; a visit is never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Visit {
    visit_id: String,
    visit_time: NaiveDate,
    department: String,
    chief_complaint: String,
}

impl Visit {
    pub fn new(
        visit_id: impl Into<String>,
        visit_time: NaiveDate,
        department: impl Into<String>,
        chief_complaint: impl Into<String>,
    ) -> Self {
        Self {
            visit_id: visit_id.into(),
            visit_time,
            department: department.into(),
            chief_complaint: chief_complaint.into(),
        }
    }

    pub fn visit_id(&self) -> &str {
        &self.visit_id
    }

    pub fn visit_time(&self) -> NaiveDate {
        self.visit_time
    }

    /// Department recorded on the visit row, which may differ from where the patient is enrolled.
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn chief_complaint(&self) -> &str {
        &self.chief_complaint
    }

    /// Whether the visit falls on the given calendar date.
    pub fn occurred_on(&self, date: NaiveDate) -> bool {
        self.visit_time == date
    }
}
