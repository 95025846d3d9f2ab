//! Loading protected-subject data sets.
//!
//! Records are created administratively elsewhere; the guard is handed a
//! JSON array of [`ProtectedSubject`] at startup.

use std::io::Read;
use std::path::Path;

use crate::error::PrivacyError;
use crate::guard::PrivacyGuard;
use crate::subject::ProtectedSubject;

const DEMO_SUBJECTS: &str = include_str!("../data/demo_subjects.json");

pub fn from_json_str(json: &str) -> Result<Vec<ProtectedSubject>, PrivacyError> {
    let subjects: Vec<ProtectedSubject> = serde_json::from_str(json)?;
    for subject in &subjects {
        subject.validate()?;
    }
    Ok(subjects)
}

pub fn from_json_reader(reader: impl Read) -> Result<Vec<ProtectedSubject>, PrivacyError> {
    let subjects: Vec<ProtectedSubject> = serde_json::from_reader(reader)?;
    for subject in &subjects {
        subject.validate()?;
    }
    Ok(subjects)
}

pub fn from_json_file(path: &Path) -> Result<Vec<ProtectedSubject>, PrivacyError> {
    let file = std::fs::File::open(path)?;
    from_json_reader(std::io::BufReader::new(file))
}

/// The sample data set shipped with the dashboard.
pub fn demo_subjects() -> Result<Vec<ProtectedSubject>, PrivacyError> {
    from_json_str(DEMO_SUBJECTS)
}

/// An in-memory guard holding the sample data set.
pub fn demo_guard() -> Result<PrivacyGuard, PrivacyError> {
    let subjects = demo_subjects()?;
    tracing::debug!(count = subjects.len(), "loaded demo protected subjects");
    PrivacyGuard::from_subjects(subjects)
}

#[cfg(test)]
mod tests {
    use edudash_core::SubjectId;

    use super::*;
    use crate::fields::FieldName;
    use crate::mark::ProtectionType;

    #[test]
    fn demo_data_is_valid() {
        let subjects = demo_subjects().unwrap();
        let ids: Vec<u64> = subjects.iter().map(|s| s.subject_id.get()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn demo_guard_serves_fatima() {
        let guard = demo_guard().unwrap();
        let id = SubjectId::new(2);
        assert_eq!(guard.masked_field(id, FieldName::FirstName), "F****");
        assert_eq!(
            guard.privacy_mark(id).map(|m| m.protection),
            Some(ProtectionType::ProtectedRegistration)
        );
    }

    #[test]
    fn optional_mark_fields_may_be_omitted() {
        let guard = demo_guard().unwrap();
        let mark = guard.privacy_mark(SubjectId::new(9)).unwrap();
        assert_eq!(mark.expiry_date, None);
        assert_eq!(mark.notes, None);
    }

    #[test]
    fn invalid_records_are_rejected() {
        let json = r#"[{
            "subjectId": 4,
            "mark": {
                "id": "018f3c2a-7b1e-7c40-9a51-2d6e0b8f4a09",
                "subjectId": 4,
                "protection": "witness-protection",
                "level": "low",
                "reason": "r",
                "effectiveDate": "2024-01-01",
                "authorizedBy": "x"
            },
            "masked": {},
            "unmasked": { "firstName": "Nora" }
        }]"#;
        assert!(matches!(from_json_str(json), Err(PrivacyError::InvalidSubject(_))));
    }

    #[test]
    fn malformed_json_is_a_seed_error() {
        assert!(matches!(from_json_str("{"), Err(PrivacyError::Seed(_))));
        assert!(matches!(
            from_json_reader(r#"[{"subjectId": "two"}]"#.as_bytes()),
            Err(PrivacyError::Seed(_))
        ));
    }

    #[test]
    fn missing_seed_file_is_an_io_error() {
        let err = from_json_file(Path::new("/nonexistent/edudash/seed.json")).unwrap_err();
        assert!(matches!(err, PrivacyError::SeedIo(_)));
    }
}
