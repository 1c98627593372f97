//! Constants used throughout the hospital core crate.
//!
//! Column names and formats for tabular patient data live here so the ingestion
//! pipeline and its tests agree on a single definition.

/// Date format accepted for `Visit_time` and for date queries.
pub const VISIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default patient data file when no explicit path is configured.
pub const DEFAULT_PATIENT_DATA_FILE: &str = "patients.csv";

/// Default credentials file when no explicit path is configured.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.csv";

/// Columns every patient data file must provide, in the order they are documented.
pub const PATIENT_DATA_COLUMNS: [&str; 11] = [
    "Patient_ID",
    "Gender",
    "Race",
    "Age",
    "Ethnicity",
    "Insurance",
    "Zip_code",
    "Visit_ID",
    "Visit_time",
    "Visit_department",
    "Chief_complaint",
];
