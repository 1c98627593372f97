//! Interactive login and role menus.
//!
//! The session reads answers line by line from any `BufRead` and writes prompts and
//! results to any `Write`, so the menus run the same against a terminal or a test
//! buffer. End of input ends the session.
//!
//! Every menu action is a direct call into [`Hospital`]; the role only decides which
//! actions are offered.

use crate::auth::{authenticate, User};
use crate::report::patient_report;
use hospital_core::{parse_visit_date, Demographics, Hospital, Patient};
use hospital_types::Role;
use std::io::{self, BufRead, Write};

pub struct Session<'h, R, W> {
    hospital: &'h mut Hospital,
    input: R,
    output: W,
}

impl<'h, R: BufRead, W: Write> Session<'h, R, W> {
    pub fn new(hospital: &'h mut Hospital, input: R, output: W) -> Self {
        Self {
            hospital,
            input,
            output,
        }
    }

    /// Prompts for credentials until a user authenticates.
    ///
    /// Returns `None` if input ends before a successful login.
    pub fn login<'u>(&mut self, users: &'u [User]) -> io::Result<Option<&'u User>> {
        loop {
            let Some(username) = self.prompt("Enter username: ")? else {
                return Ok(None);
            };
            let Some(password) = self.prompt("Enter password: ")? else {
                return Ok(None);
            };

            match authenticate(&username, &password, users) {
                Some(user) => {
                    tracing::info!("user {} logged in as {}", user.username, user.role);
                    return Ok(Some(user));
                }
                None => writeln!(self.output, "Invalid credentials. Please try again.")?,
            }
        }
    }

    /// Runs the menu offered to `role` until the user stops or input ends.
    pub fn run(&mut self, role: Role) -> io::Result<()> {
        match role {
            Role::Admin => {
                writeln!(self.output, "You have admin role. You can perform count_visits.")?;
                self.menu_loop("Choose an action (count_visits, stop): ", role)
            }
            Role::Clinician | Role::Nurse => self.menu_loop(
                "Choose an action (add_patient, remove_patient, retrieve_patient, count_visits, stop): ",
                role,
            ),
            Role::Management => self.management_report(),
        }
    }

    fn menu_loop(&mut self, menu: &str, role: Role) -> io::Result<()> {
        loop {
            let Some(action) = self.prompt(menu)? else {
                return Ok(());
            };

            match action.to_ascii_lowercase().as_str() {
                "stop" => return Ok(()),
                "count_visits" => self.count_visits()?,
                "add_patient" if role.is_clinical() => self.add_patient()?,
                "remove_patient" if role.is_clinical() => self.remove_patient()?,
                "retrieve_patient" if role.is_clinical() => self.retrieve_patient()?,
                _ => writeln!(self.output, "Invalid action.")?,
            }
        }
    }

    fn count_visits(&mut self) -> io::Result<()> {
        let Some(date_str) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(());
        };

        match parse_visit_date(&date_str) {
            Ok(date) => {
                let total = self.hospital.count_visits_on(date);
                writeln!(
                    self.output,
                    "Total visits on {}: {}",
                    date.format("%Y-%m-%d"),
                    total
                )
            }
            Err(_) => writeln!(self.output, "Invalid date format."),
        }
    }

    fn add_patient(&mut self) -> io::Result<()> {
        let mut answers = Vec::with_capacity(8);
        for label in [
            "Department: ",
            "Patient ID: ",
            "Gender: ",
            "Race: ",
            "Age: ",
            "Ethnicity: ",
            "Insurance: ",
            "Zip code: ",
        ] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(()),
            }
        }
        let [department, patient_id, gender, race, age, ethnicity, insurance, zip_code]: [String; 8] =
            match answers.try_into() {
                Ok(fields) => fields,
                Err(_) => return Ok(()),
            };

        if patient_id.is_empty() {
            return writeln!(self.output, "Patient ID cannot be empty.");
        }
        let Ok(age) = age.parse::<u32>() else {
            return writeln!(self.output, "Invalid age.");
        };

        let patient = Patient::new(
            patient_id.as_str(),
            Demographics {
                gender,
                race,
                age,
                ethnicity,
                insurance,
                zip_code,
            },
        );

        match self.hospital.enroll_patient(&department, patient) {
            Ok(()) => writeln!(
                self.output,
                "Patient {patient_id} added to {department} department."
            ),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn remove_patient(&mut self) -> io::Result<()> {
        let Some(department) = self.prompt("Department: ")? else {
            return Ok(());
        };
        let Some(patient_id) = self.prompt("Patient ID: ")? else {
            return Ok(());
        };

        match self.hospital.remove_patient(&department, &patient_id) {
            Ok(true) => writeln!(
                self.output,
                "Patient {patient_id} removed from {department} department."
            ),
            Ok(false) => writeln!(
                self.output,
                "Patient {patient_id} not found in {department} department."
            ),
            Err(e) => writeln!(self.output, "Error: {e}"),
        }
    }

    fn retrieve_patient(&mut self) -> io::Result<()> {
        let Some(patient_id) = self.prompt("Patient ID: ")? else {
            return Ok(());
        };

        match self.hospital.find_patient(&patient_id) {
            Some(patient) => {
                let department = self.hospital.department_of(&patient_id);
                write!(self.output, "{}", patient_report(patient, department))
            }
            None => writeln!(self.output, "Patient {patient_id} not found."),
        }
    }

    fn management_report(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "You have management role. Statistics reporting is not available yet."
        )
    }

    /// Writes `label`, then reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_core::Visit;
    use std::io::Cursor;

    fn users() -> Vec<User> {
        vec![
            User {
                username: "admin".into(),
                password: "pw".into(),
                role: Role::Admin,
            },
            User {
                username: "nina".into(),
                password: "pw".into(),
                role: Role::Nurse,
            },
        ]
    }

    fn hospital() -> Hospital {
        let mut hospital = Hospital::new();
        hospital.add_department("ER");
        hospital
            .enroll_patient("ER", Patient::new("P1", Demographics::default()))
            .unwrap();
        hospital
            .add_visit(
                "P1",
                Visit::new("V1", parse_visit_date("2024-01-05").unwrap(), "ER", "cough"),
            )
            .unwrap();
        hospital
    }

    fn run_session(hospital: &mut Hospital, role: Role, input: &str) -> String {
        let mut output = Vec::new();
        Session::new(hospital, Cursor::new(input), &mut output)
            .run(role)
            .expect("session should not fail on in-memory io");
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn login_retries_until_valid_credentials() {
        let mut hospital = hospital();
        let users = users();
        let mut output = Vec::new();
        let input = Cursor::new("admin\nwrong\nnina\npw\n");

        let user = Session::new(&mut hospital, input, &mut output)
            .login(&users)
            .unwrap()
            .expect("second attempt is valid");

        assert_eq!(user.role, Role::Nurse);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Invalid credentials").count(), 1);
    }

    #[test]
    fn login_ends_at_end_of_input() {
        let mut hospital = hospital();
        let users = users();
        let mut output = Vec::new();

        let user = Session::new(&mut hospital, Cursor::new("admin\n"), &mut output)
            .login(&users)
            .unwrap();

        assert!(user.is_none());
    }

    #[test]
    fn admin_counts_visits_by_date() {
        let mut hospital = hospital();

        let output = run_session(
            &mut hospital,
            Role::Admin,
            "count_visits\n2024-01-05\ncount_visits\nyesterday\nstop\n",
        );

        assert!(output.contains("Total visits on 2024-01-05: 1"));
        assert!(output.contains("Invalid date format."));
    }

    #[test]
    fn admin_is_not_offered_clinical_actions() {
        let mut hospital = hospital();

        let output = run_session(&mut hospital, Role::Admin, "remove_patient\nstop\n");

        assert!(output.contains("Invalid action."));
        assert!(hospital.find_patient("P1").is_some());
    }

    #[test]
    fn nurse_adds_retrieves_and_removes_patient() {
        let mut hospital = hospital();

        let output = run_session(
            &mut hospital,
            Role::Nurse,
            "add_patient\nER\nP2\nM\nWhite\n61\nHispanic\nPrivate\n10001\n\
             retrieve_patient\nP2\n\
             remove_patient\nER\nP2\n\
             retrieve_patient\nP2\n\
             stop\n",
        );

        assert!(output.contains("Patient P2 added to ER department."));
        assert!(output.contains("Age: 61"));
        assert!(output.contains("Patient P2 removed from ER department."));
        assert!(output.contains("Patient P2 not found."));
        assert!(hospital.find_patient("P2").is_none());
    }

    #[test]
    fn clinician_sees_registry_errors_without_leaving_menu() {
        let mut hospital = hospital();

        let output = run_session(
            &mut hospital,
            Role::Clinician,
            "add_patient\nOncology\nP3\nF\nBlack\n30\nNon-Hispanic\nMedicaid\n60601\n\
             add_patient\nER\nP4\nF\nBlack\nthirty\nNon-Hispanic\nMedicaid\n60601\n\
             remove_patient\nER\nP9\n\
             count_visits\n2024-01-05\n\
             stop\n",
        );

        assert!(output.contains("department 'Oncology' does not exist"));
        assert!(output.contains("Invalid age."));
        assert!(output.contains("Patient P9 not found in ER department."));
        assert!(output.contains("Total visits on 2024-01-05: 1"));
        assert!(hospital.find_patient("P3").is_none());
        assert!(hospital.find_patient("P4").is_none());
    }

    #[test]
    fn management_gets_report_notice() {
        let mut hospital = hospital();

        let output = run_session(&mut hospital, Role::Management, "");

        assert!(output.contains("management role"));
    }
}
