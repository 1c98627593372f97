//! The hospital registry.
//!
//! [`Hospital`] is the root of the ownership tree. Departments are stored by value in
//! insertion order, with two side maps kept in step with every mutation:
//!
//! - department name → slot in the department list
//! - patient id → slot of the department the patient is enrolled in
//!
//! Departments are never removed, so slots stay valid for the life of the registry.
//! Patient ids are unique across the whole hospital; enrolling an id that is already
//! present anywhere fails with [`HospitalError::DuplicatePatient`].
//!
//! ## Pure Data Operations
//!
//! The registry performs no authentication or authorisation. Callers are expected to
//! have decided whether the operation is allowed before invoking it.

use crate::error::{HospitalError, HospitalResult};
use crate::models::{Department, Patient, Visit};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Registry of departments, their patients and visits.
#[derive(Clone, Debug, Default)]
pub struct Hospital {
    departments: Vec<Department>,
    department_slots: HashMap<String, usize>,
    patient_index: HashMap<String, usize>,
}

impl Hospital {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a department if it does not already exist.
    ///
    /// Returns `true` if a new department was created and `false` if the name was
    /// already registered.
    pub fn add_department(&mut self, name: &str) -> bool {
        if self.department_slots.contains_key(name) {
            return false;
        }

        let slot = self.departments.len();
        self.departments.push(Department::new(name));
        self.department_slots.insert(name.to_string(), slot);
        tracing::debug!("registered department {}", name);
        true
    }

    pub fn get_department(&self, name: &str) -> Option<&Department> {
        self.department_slots
            .get(name)
            .map(|&slot| &self.departments[slot])
    }

    pub fn has_department(&self, name: &str) -> bool {
        self.department_slots.contains_key(name)
    }

    /// Departments in registration order.
    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.iter()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    /// Total number of enrolled patients across all departments.
    pub fn patient_count(&self) -> usize {
        self.patient_index.len()
    }

    /// Enrolls `patient` into the named department.
    ///
    /// # Errors
    ///
    /// - [`HospitalError::DepartmentNotFound`] if the department is not registered
    /// - [`HospitalError::DuplicatePatient`] if the patient id is enrolled anywhere already
    ///
    /// The registry is unchanged on error.
    pub fn enroll_patient(
        &mut self,
        department_name: &str,
        patient: Patient,
    ) -> HospitalResult<()> {
        let slot = *self
            .department_slots
            .get(department_name)
            .ok_or_else(|| HospitalError::department_not_found(department_name))?;

        if let Some(&existing) = self.patient_index.get(patient.patient_id()) {
            return Err(HospitalError::DuplicatePatient {
                patient_id: patient.patient_id().to_string(),
                department: self.departments[existing].name().to_string(),
            });
        }

        let patient_id = patient.patient_id().to_string();
        self.departments[slot].enroll(patient);
        tracing::info!("patient {} added to {} department", patient_id, department_name);
        self.patient_index.insert(patient_id, slot);

        Ok(())
    }

    /// Removes a patient from the named department.
    ///
    /// Returns `Ok(true)` if the patient was found and removed, `Ok(false)` if the
    /// department exists but does not hold that patient.
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::DepartmentNotFound`] if the department is not registered.
    pub fn remove_patient(
        &mut self,
        department_name: &str,
        patient_id: &str,
    ) -> HospitalResult<bool> {
        let slot = *self
            .department_slots
            .get(department_name)
            .ok_or_else(|| HospitalError::department_not_found(department_name))?;

        match self.departments[slot].remove(patient_id) {
            Some(_) => {
                self.patient_index.remove(patient_id);
                tracing::info!(
                    "patient {} removed from {} department",
                    patient_id,
                    department_name
                );
                Ok(true)
            }
            None => {
                tracing::info!(
                    "patient {} not found in {} department",
                    patient_id,
                    department_name
                );
                Ok(false)
            }
        }
    }

    /// Looks up a patient by id across all departments.
    pub fn find_patient(&self, patient_id: &str) -> Option<&Patient> {
        let found = self
            .patient_index
            .get(patient_id)
            .and_then(|&slot| self.departments[slot].patient(patient_id));
        if found.is_none() {
            tracing::debug!("patient {} not found", patient_id);
        }
        found
    }

    pub fn find_patient_mut(&mut self, patient_id: &str) -> Option<&mut Patient> {
        let slot = *self.patient_index.get(patient_id)?;
        self.departments[slot].patient_mut(patient_id)
    }

    /// Name of the department the patient is enrolled in.
    pub fn department_of(&self, patient_id: &str) -> Option<&str> {
        self.patient_index
            .get(patient_id)
            .map(|&slot| self.departments[slot].name())
    }

    /// Appends a visit to an enrolled patient.
    pub fn add_visit(&mut self, patient_id: &str, visit: Visit) -> HospitalResult<()> {
        self.patient_or_not_found(patient_id)?.add_visit(visit);
        Ok(())
    }

    /// Attaches a note to an enrolled patient.
    pub fn add_note(
        &mut self,
        patient_id: &str,
        note_id: &str,
        note_type: &str,
    ) -> HospitalResult<()> {
        self.patient_or_not_found(patient_id)?
            .add_note(note_id, note_type);
        Ok(())
    }

    /// Removes the first note with `note_id` from an enrolled patient.
    ///
    /// Returns whether a note was removed.
    pub fn remove_note(&mut self, patient_id: &str, note_id: &str) -> HospitalResult<bool> {
        Ok(self.patient_or_not_found(patient_id)?.remove_note(note_id))
    }

    /// Counts visits across every department and patient that fall on `date`.
    pub fn count_visits_on(&self, date: NaiveDate) -> usize {
        self.departments
            .iter()
            .flat_map(Department::patients)
            .map(|p| p.visits_on(date))
            .sum()
    }

    fn patient_or_not_found(&mut self, patient_id: &str) -> HospitalResult<&mut Patient> {
        self.find_patient_mut(patient_id)
            .ok_or_else(|| HospitalError::PatientNotFound(patient_id.to_string()))
    }
}
