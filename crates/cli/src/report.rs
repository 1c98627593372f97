//! Plain-text rendering of registry records for the terminal.

use hospital_core::{Hospital, Patient};
use std::fmt::Write;

/// Renders a patient's demographics, visits and notes.
pub fn patient_report(patient: &Patient, department: Option<&str>) -> String {
    let d = patient.demographics();
    let mut out = String::new();

    let _ = writeln!(out, "Patient {}", patient.patient_id());
    if let Some(department) = department {
        let _ = writeln!(out, "  Department: {department}");
    }
    let _ = writeln!(out, "  Gender: {}", d.gender);
    let _ = writeln!(out, "  Race: {}", d.race);
    let _ = writeln!(out, "  Age: {}", d.age);
    let _ = writeln!(out, "  Ethnicity: {}", d.ethnicity);
    let _ = writeln!(out, "  Insurance: {}", d.insurance);
    let _ = writeln!(out, "  Zip code: {}", d.zip_code);

    let _ = writeln!(out, "  Visits ({}):", patient.visits().len());
    for visit in patient.visits() {
        let _ = writeln!(
            out,
            "    {} {} {} - {}",
            visit.visit_time().format("%Y-%m-%d"),
            visit.visit_id(),
            visit.department(),
            visit.chief_complaint()
        );
    }

    if !patient.notes().is_empty() {
        let _ = writeln!(out, "  Notes ({}):", patient.notes().len());
        for note in patient.notes() {
            let _ = writeln!(out, "    {} ({})", note.note_id, note.note_type);
        }
    }

    out
}

/// One line per department with its patient count.
pub fn department_summary(hospital: &Hospital) -> String {
    if hospital.department_count() == 0 {
        return "No departments registered.\n".to_string();
    }

    let mut out = String::new();
    for department in hospital.departments() {
        let _ = writeln!(out, "{}: {} patients", department.name(), department.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_core::{parse_visit_date, Demographics, Visit};

    #[test]
    fn patient_report_lists_visits_in_order() {
        let mut patient = Patient::new(
            "P1",
            Demographics {
                gender: "F".into(),
                age: 42,
                ..Demographics::default()
            },
        );
        patient.add_visit(Visit::new(
            "V1",
            parse_visit_date("2024-01-05").unwrap(),
            "ER",
            "chest pain",
        ));
        patient.add_visit(Visit::new(
            "V2",
            parse_visit_date("2024-01-07").unwrap(),
            "ER",
            "follow-up",
        ));

        let report = patient_report(&patient, Some("ER"));

        assert!(report.starts_with("Patient P1\n"));
        assert!(report.contains("Department: ER"));
        assert!(report.contains("Age: 42"));
        let first = report.find("V1").unwrap();
        let second = report.find("V2").unwrap();
        assert!(first < second);
        assert!(!report.contains("Notes"));
    }

    #[test]
    fn department_summary_counts_patients() {
        let mut hospital = Hospital::new();
        assert_eq!(department_summary(&hospital), "No departments registered.\n");

        hospital.add_department("ER");
        hospital.add_department("ICU");
        hospital
            .enroll_patient("ER", Patient::new("P1", Demographics::default()))
            .unwrap();

        assert_eq!(
            department_summary(&hospital),
            "ER: 1 patients\nICU: 0 patients\n"
        );
    }
}
