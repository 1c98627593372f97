/// Errors raised by the hospital registry and the ingestion pipeline.
///
/// Not-found conditions are recoverable outcomes for the caller; nothing in the core
/// terminates the process.
#[derive(Debug, thiserror::Error)]
pub enum HospitalError {
    #[error("department '{0}' does not exist")]
    DepartmentNotFound(String),
    #[error("patient {0} not found")]
    PatientNotFound(String),
    #[error("patient {patient_id} is already enrolled in {department}")]
    DuplicatePatient {
        patient_id: String,
        department: String,
    },
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read input file: {0}")]
    FileRead(std::io::Error),
}

impl HospitalError {
    /// Builds a [`HospitalError::DepartmentNotFound`] from any string-like name.
    pub(crate) fn department_not_found(name: impl Into<String>) -> Self {
        HospitalError::DepartmentNotFound(name.into())
    }

    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        HospitalError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}

pub type HospitalResult<T> = std::result::Result<T, HospitalError>;
