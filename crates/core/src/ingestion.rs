//! Tabular patient data ingestion.
//!
//! Each input row is one visit event. Patient demographics are repeated on every row for
//! a patient and are read only from the first row that introduces the patient id.
//!
//! ## Input layout
//!
//! ```text
//! Patient_ID,Gender,Race,Age,Ethnicity,Insurance,Zip_code,Visit_ID,Visit_time,Visit_department,Chief_complaint
//! P1,F,Asian,42,Non-Hispanic,Medicare,02139,V1,2024-01-05,ER,chest pain
//! ```
//!
//! Columns are matched by header name; extra columns are ignored and field values are
//! trimmed. `Visit_time` must be `YYYY-MM-DD`.
//!
//! ## Atomicity
//!
//! Rows are applied to a staged copy of the target registry. The copy replaces the
//! target only after every row has been applied, so a malformed row or a rejected
//! department leaves the caller's registry exactly as it was.

use crate::config::{DepartmentPolicy, RegistryConfig};
use crate::constants::{PATIENT_DATA_COLUMNS, VISIT_DATE_FORMAT};
use crate::error::{HospitalError, HospitalResult};
use crate::hospital::Hospital;
use crate::models::{Demographics, Patient, Visit};
use chrono::NaiveDate;
use hospital_types::NonEmptyText;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Tabular formats accepted by the ingestion pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl InputFormat {
    /// Detects the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`HospitalError::UnsupportedFormat`] for any extension other than
    /// `.csv` or `.tsv`.
    pub fn from_path(path: &Path) -> HospitalResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("tsv") => Ok(InputFormat::Tsv),
            _ => Err(HospitalError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            InputFormat::Csv => b',',
            InputFormat::Tsv => b'\t',
        }
    }
}

/// Counters describing one ingestion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows: usize,
    pub patients_created: usize,
    pub visits_added: usize,
    pub departments_registered: usize,
    /// Visits dropped because their patient could not be enrolled.
    pub visits_skipped: usize,
}

/// Raw row as it appears in the input file.
#[derive(Debug, Deserialize)]
struct VisitRow {
    #[serde(rename = "Patient_ID")]
    patient_id: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Race")]
    race: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Ethnicity")]
    ethnicity: String,
    #[serde(rename = "Insurance")]
    insurance: String,
    #[serde(rename = "Zip_code")]
    zip_code: String,
    #[serde(rename = "Visit_ID")]
    visit_id: String,
    #[serde(rename = "Visit_time")]
    visit_time: String,
    #[serde(rename = "Visit_department")]
    visit_department: String,
    #[serde(rename = "Chief_complaint")]
    chief_complaint: String,
}

/// A row whose fields have been validated.
struct VisitEvent {
    patient_id: NonEmptyText,
    department: NonEmptyText,
    demographics: Demographics,
    visit: Visit,
}

impl VisitRow {
    fn validate(self, line: u64) -> HospitalResult<VisitEvent> {
        let patient_id = NonEmptyText::new(&self.patient_id)
            .map_err(|_| HospitalError::malformed(line, "Patient_ID is empty"))?;
        let department = NonEmptyText::new(&self.visit_department)
            .map_err(|_| HospitalError::malformed(line, "Visit_department is empty"))?;

        let age = self.age.trim().parse::<u32>().map_err(|_| {
            HospitalError::malformed(
                line,
                format!("Age '{}' is not a non-negative integer", self.age),
            )
        })?;

        let visit_time = parse_visit_date(&self.visit_time).map_err(|_| {
            HospitalError::malformed(
                line,
                format!("Visit_time '{}' is not a YYYY-MM-DD date", self.visit_time),
            )
        })?;

        let visit = Visit::new(
            self.visit_id,
            visit_time,
            department.as_str(),
            self.chief_complaint,
        );

        Ok(VisitEvent {
            patient_id,
            department,
            demographics: Demographics {
                gender: self.gender,
                race: self.race,
                age,
                ethnicity: self.ethnicity,
                insurance: self.insurance,
                zip_code: self.zip_code,
            },
            visit,
        })
    }
}

/// Parses a `YYYY-MM-DD` date as used by `Visit_time` and date queries.
pub fn parse_visit_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), VISIT_DATE_FORMAT)
}

/// Builds registry state from tabular visit rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ingestor {
    policy: DepartmentPolicy,
}

impl Ingestor {
    pub fn new(policy: DepartmentPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(cfg: &RegistryConfig) -> Self {
        Self::new(cfg.department_policy())
    }

    pub fn policy(&self) -> DepartmentPolicy {
        self.policy
    }

    /// Builds a new registry from a patient data file.
    pub fn load_path(&self, path: &Path) -> HospitalResult<Hospital> {
        let mut hospital = Hospital::new();
        self.ingest_path(&mut hospital, path)?;
        Ok(hospital)
    }

    /// Ingests a patient data file into an existing registry.
    ///
    /// # Errors
    ///
    /// - [`HospitalError::UnsupportedFormat`] if the extension is not `.csv` or `.tsv`
    /// - [`HospitalError::FileRead`] if the file cannot be opened or read
    /// - any error from [`Ingestor::ingest_reader`]
    pub fn ingest_path(
        &self,
        hospital: &mut Hospital,
        path: &Path,
    ) -> HospitalResult<IngestSummary> {
        let format = InputFormat::from_path(path)?;
        let file = File::open(path).map_err(HospitalError::FileRead)?;
        tracing::debug!("ingesting {} as {:?}", path.display(), format);
        self.ingest_reader(hospital, file, format)
    }

    /// Ingests rows from any reader into an existing registry.
    ///
    /// # Errors
    ///
    /// - [`HospitalError::MalformedRow`] for a missing column, an unparseable `Age` or
    ///   `Visit_time`, an empty `Patient_ID`/`Visit_department`, or a row with the wrong
    ///   number of fields
    /// - [`HospitalError::DepartmentNotFound`] under [`DepartmentPolicy::Reject`]
    /// - [`HospitalError::FileRead`] if the reader fails
    ///
    /// On error `hospital` is left unchanged.
    pub fn ingest_reader<R: Read>(
        &self,
        hospital: &mut Hospital,
        reader: R,
        format: InputFormat,
    ) -> HospitalResult<IngestSummary> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter())
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(csv_error)?.clone();
        if let Some(missing) = PATIENT_DATA_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(HospitalError::malformed(
                1,
                format!("missing column {missing}"),
            ));
        }

        let mut staged = hospital.clone();
        let mut summary = IngestSummary::default();

        for record in csv_reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: VisitRow = record
                .deserialize(Some(&headers))
                .map_err(|e| HospitalError::malformed(line, e.to_string()))?;
            let event = row.validate(line)?;

            self.apply(&mut staged, event, line, &mut summary)?;
            summary.rows += 1;
        }

        *hospital = staged;
        tracing::info!(
            "ingested {} rows: {} patients created, {} visits added, {} visits skipped",
            summary.rows,
            summary.patients_created,
            summary.visits_added,
            summary.visits_skipped
        );

        Ok(summary)
    }

    fn apply(
        &self,
        hospital: &mut Hospital,
        event: VisitEvent,
        line: u64,
        summary: &mut IngestSummary,
    ) -> HospitalResult<()> {
        let patient_id = event.patient_id.as_str();
        let department = event.department.as_str();

        if hospital.find_patient(patient_id).is_none() {
            if !hospital.has_department(department) {
                match self.policy {
                    DepartmentPolicy::AutoRegister => {
                        hospital.add_department(department);
                        summary.departments_registered += 1;
                    }
                    DepartmentPolicy::Reject => {
                        return Err(HospitalError::department_not_found(department));
                    }
                    DepartmentPolicy::Skip => {}
                }
            }

            let patient = Patient::new(patient_id, event.demographics);
            match hospital.enroll_patient(department, patient) {
                Ok(()) => summary.patients_created += 1,
                Err(HospitalError::DepartmentNotFound(name)) => {
                    tracing::warn!(
                        "line {}: department '{}' does not exist, patient {} not enrolled",
                        line,
                        name,
                        patient_id
                    );
                }
                Err(e) => return Err(e),
            }
        }

        match hospital.find_patient_mut(patient_id) {
            Some(patient) => {
                patient.add_visit(event.visit);
                summary.visits_added += 1;
            }
            None => summary.visits_skipped += 1,
        }

        Ok(())
    }
}

fn csv_error(err: csv::Error) -> HospitalError {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => HospitalError::FileRead(io),
        csv::ErrorKind::Utf8 { err, .. } => HospitalError::malformed(line, err.to_string()),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => HospitalError::malformed(
            line,
            format!("expected {expected_len} fields, found {len}"),
        ),
        other => HospitalError::malformed(line, format!("{other:?}")),
    }
}
