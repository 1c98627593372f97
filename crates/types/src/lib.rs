//! Validated primitives shared by the hospital registry crates.
//!
//! - [`NonEmptyText`] for identifiers and names that must carry content
//! - [`Role`] for the staff roles recognised by the credential file

use std::str::FromStr;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction, so
/// `" ER "` and `"ER"` produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing a [`Role`].
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("unknown role: {0}")]
    Unknown(String),
}

/// Staff role attached to a set of credentials.
///
/// The role decides which menu a user is offered; it is never consulted by the registry
/// itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Clinician,
    Nurse,
    Management,
}

impl Role {
    /// Wire form used in the credential file.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Clinician => "clinician",
            Role::Nurse => "nurse",
            Role::Management => "management",
        }
    }

    /// Whether this role is offered the clinical menu (add, remove, retrieve, count).
    pub fn is_clinical(self) -> bool {
        matches!(self, Role::Clinician | Role::Nurse)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "clinician" => Ok(Role::Clinician),
            "nurse" => Ok(Role::Nurse),
            "management" => Ok(Role::Management),
            _ => Err(RoleError::Unknown(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  ICU \t").expect("should accept padded text");
        assert_eq!(text.as_str(), "ICU");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        let err = NonEmptyText::new("   ").expect_err("whitespace should be rejected");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty() {
        let err = serde_json::from_str::<NonEmptyText>("\"\"").expect_err("should fail");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" nurse ".parse::<Role>().unwrap(), Role::Nurse);
        assert_eq!("MANAGEMENT".parse::<Role>().unwrap(), Role::Management);
    }

    #[test]
    fn role_rejects_unknown_value() {
        let err = "porter".parse::<Role>().expect_err("unknown role");
        assert!(matches!(err, RoleError::Unknown(ref r) if r == "porter"));
    }

    #[test]
    fn clinical_roles() {
        assert!(Role::Clinician.is_clinical());
        assert!(Role::Nurse.is_clinical());
        assert!(!Role::Admin.is_clinical());
        assert!(!Role::Management.is_clinical());
    }
}
