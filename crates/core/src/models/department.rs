use super::Patient;
use serde::Serialize;

/// A named organisational unit holding its enrolled patients.
///
/// Patients are kept in enrollment order. The department itself does not check for
/// duplicate identifiers; [`crate::Hospital`] guards uniqueness across all departments
/// before calling [`Department::enroll`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Department {
    name: String,
    patients: Vec<Patient>,
}

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patients: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.patient_id() == patient_id)
    }

    pub fn patient_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        self.patients
            .iter_mut()
            .find(|p| p.patient_id() == patient_id)
    }

    pub(crate) fn enroll(&mut self, patient: Patient) {
        self.patients.push(patient);
    }

    /// Removes and returns the first patient with `patient_id`.
    pub(crate) fn remove(&mut self, patient_id: &str) -> Option<Patient> {
        let index = self
            .patients
            .iter()
            .position(|p| p.patient_id() == patient_id)?;
        Some(self.patients.remove(index))
    }
}
