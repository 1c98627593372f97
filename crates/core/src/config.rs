//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the ingestion
//! pipeline and the CLI. Nothing in the core reads environment variables while serving
//! an operation.

use crate::constants::{DEFAULT_CREDENTIALS_FILE, DEFAULT_PATIENT_DATA_FILE};
use crate::{HospitalError, HospitalResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What ingestion does with a row whose `Visit_department` has not been registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepartmentPolicy {
    /// Register the department on first sight, then enroll.
    #[default]
    AutoRegister,
    /// Fail the whole ingestion with `DepartmentNotFound`.
    Reject,
    /// Report the failed enrollment and drop the row's visit.
    Skip,
}

impl DepartmentPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DepartmentPolicy::AutoRegister => "auto-register",
            DepartmentPolicy::Reject => "reject",
            DepartmentPolicy::Skip => "skip",
        }
    }
}

impl FromStr for DepartmentPolicy {
    type Err = HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto-register" | "auto_register" | "auto" => Ok(DepartmentPolicy::AutoRegister),
            "reject" => Ok(DepartmentPolicy::Reject),
            "skip" => Ok(DepartmentPolicy::Skip),
            other => Err(HospitalError::InvalidInput(format!(
                "unknown department policy '{other}' (expected auto-register, reject or skip)"
            ))),
        }
    }
}

impl std::fmt::Display for DepartmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    patient_data_path: PathBuf,
    credentials_path: PathBuf,
    department_policy: DepartmentPolicy,
}

impl RegistryConfig {
    /// Create a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns `HospitalError::InvalidInput` if either path is empty.
    pub fn new(
        patient_data_path: PathBuf,
        credentials_path: PathBuf,
        department_policy: DepartmentPolicy,
    ) -> HospitalResult<Self> {
        if patient_data_path.as_os_str().is_empty() {
            return Err(HospitalError::InvalidInput(
                "patient data path cannot be empty".into(),
            ));
        }
        if credentials_path.as_os_str().is_empty() {
            return Err(HospitalError::InvalidInput(
                "credentials path cannot be empty".into(),
            ));
        }

        Ok(Self {
            patient_data_path,
            credentials_path,
            department_policy,
        })
    }

    pub fn patient_data_path(&self) -> &Path {
        &self.patient_data_path
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    pub fn department_policy(&self) -> DepartmentPolicy {
        self.department_policy
    }
}

/// Resolve a file path from an optional override, falling back to `default`.
///
/// Empty or whitespace-only values count as absent.
pub fn path_from_env_value(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Resolve the patient data path, defaulting to [`DEFAULT_PATIENT_DATA_FILE`].
pub fn patient_data_path_from_env_value(value: Option<String>) -> PathBuf {
    path_from_env_value(value, DEFAULT_PATIENT_DATA_FILE)
}

/// Resolve the credentials path, defaulting to [`DEFAULT_CREDENTIALS_FILE`].
pub fn credentials_path_from_env_value(value: Option<String>) -> PathBuf {
    path_from_env_value(value, DEFAULT_CREDENTIALS_FILE)
}

/// Parse the department policy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DepartmentPolicy::AutoRegister`].
pub fn department_policy_from_env_value(
    value: Option<String>,
) -> HospitalResult<DepartmentPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<DepartmentPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
