//! Credential loading and the login check.
//!
//! Credentials are a CSV file with the header `username,password,role`. Authentication
//! is a plain equality lookup; the first user whose username and password both match
//! wins.

use hospital_types::Role;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read credentials file: {0}")]
    CredentialsRead(std::io::Error),
    #[error("invalid credentials at line {line}: {reason}")]
    CredentialsMalformed { line: u64, reason: String },
}

/// A staff member allowed to log in.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Loads all users from a credentials file.
pub fn load_credentials(path: &Path) -> Result<Vec<User>, CliError> {
    let file = File::open(path).map_err(CliError::CredentialsRead)?;
    read_credentials(file)
}

/// Reads users from CSV content with a `username,password,role` header.
pub fn read_credentials<R: Read>(reader: R) -> Result<Vec<User>, CliError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut users = Vec::new();
    for result in csv_reader.deserialize::<User>() {
        let user = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or_default();
            match e.into_kind() {
                csv::ErrorKind::Io(io) => CliError::CredentialsRead(io),
                other => CliError::CredentialsMalformed {
                    line,
                    reason: match other {
                        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
                        other => format!("{other:?}"),
                    },
                },
            }
        })?;
        users.push(user);
    }

    Ok(users)
}

/// Returns the first user matching both `username` and `password`.
pub fn authenticate<'a>(username: &str, password: &str, users: &'a [User]) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CREDENTIALS: &str = "username,password,role\n\
                               alice,secret,admin\n\
                               bob,hunter2,Nurse\n\
                               bob,other,management\n";

    #[test]
    fn reads_users_and_roles() {
        let users = read_credentials(Cursor::new(CREDENTIALS)).expect("parse credentials");

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].username, "alice");
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[1].role, Role::Nurse);
    }

    #[test]
    fn authenticate_requires_matching_password() {
        let users = read_credentials(Cursor::new(CREDENTIALS)).unwrap();

        assert!(authenticate("alice", "wrong", &users).is_none());
        assert!(authenticate("carol", "secret", &users).is_none());

        let user = authenticate("bob", "other", &users).expect("second bob entry");
        assert_eq!(user.role, Role::Management);
    }

    #[test]
    fn unknown_role_is_reported_with_line() {
        let input = "username,password,role\nalice,secret,admin\ndave,pw,porter\n";

        let err = read_credentials(Cursor::new(input)).expect_err("porter is not a role");

        match err {
            CliError::CredentialsMalformed { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("porter"));
            }
            other => panic!("expected CredentialsMalformed error, got {other:?}"),
        }
    }

    #[test]
    fn load_credentials_reports_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = load_credentials(&temp_dir.path().join("missing.csv"))
            .expect_err("file does not exist");
        assert!(matches!(err, CliError::CredentialsRead(_)));
    }

    #[test]
    fn load_credentials_reads_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("credentials.csv");
        std::fs::write(&path, CREDENTIALS).expect("write credentials");

        let users = load_credentials(&path).expect("load credentials");
        assert_eq!(users.len(), 3);
    }
}
