use serde::{Deserialize, Serialize};

use edudash_core::{DomainError, DomainResult, Entity, SubjectId};

use crate::fields::FieldSet;
use crate::mark::PrivacyMark;
use crate::masking::mask_field;

/// A subject under protection: exactly one mark plus the masked and unmasked
/// representations of their sensitive fields.
///
/// # Invariants
/// - `mark.subject_id == subject_id`.
/// - Every unmasked field has a masked entry.
/// - A masked value never contains its (non-blank) unmasked value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedSubject {
    pub subject_id: SubjectId,
    pub mark: PrivacyMark,
    #[serde(default)]
    pub masked: FieldSet,
    #[serde(default)]
    pub unmasked: FieldSet,
}

impl ProtectedSubject {
    /// A subject with a mark but no field data yet.
    pub fn new(mark: PrivacyMark) -> Self {
        Self {
            subject_id: mark.subject_id,
            mark,
            masked: FieldSet::new(),
            unmasked: FieldSet::new(),
        }
    }

    /// Derive the masked set from the true values.
    pub fn from_unmasked(mark: PrivacyMark, unmasked: FieldSet) -> Self {
        let masked = unmasked
            .iter()
            .map(|(field, value)| (field, mask_field(field, value)))
            .collect();
        Self {
            subject_id: mark.subject_id,
            mark,
            masked,
            unmasked,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.mark.subject_id != self.subject_id {
            return Err(DomainError::invariant(format!(
                "mark for subject {} attached to subject {}",
                self.mark.subject_id, self.subject_id
            )));
        }

        for (field, value) in self.unmasked.iter() {
            let Some(masked) = self.masked.get(field) else {
                return Err(DomainError::invariant(format!(
                    "subject {}: field '{}' has no masked value",
                    self.subject_id, field
                )));
            };
            if reveals(masked, value) {
                return Err(DomainError::invariant(format!(
                    "subject {}: masked '{}' reveals the unmasked value",
                    self.subject_id, field
                )));
            }
        }

        Ok(())
    }
}

/// Whether `masked` contains the true value, ignoring case and surrounding
/// whitespace.
fn reveals(masked: &str, value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && masked.to_lowercase().contains(&value.to_lowercase())
}

impl Entity for ProtectedSubject {
    type Id = SubjectId;

    fn id(&self) -> &Self::Id {
        &self.subject_id
    }
}

/// All displayable fields of a protected subject for one caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
    pub subject_id: SubjectId,
    /// `true` when `fields` holds unmasked values.
    pub revealed: bool,
    pub fields: FieldSet,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use edudash_core::MarkId;

    use super::*;
    use crate::fields::FieldName;
    use crate::mark::{ProtectionType, SeverityLevel};

    fn mark(subject: u64) -> PrivacyMark {
        PrivacyMark {
            id: MarkId::new(),
            subject_id: SubjectId::new(subject),
            protection: ProtectionType::ConfidentialityMarking,
            level: SeverityLevel::Medium,
            reason: "Registered confidential".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            expiry_date: None,
            authorized_by: "Tax agency".to_string(),
            notes: None,
        }
    }

    #[test]
    fn from_unmasked_derives_valid_masks() {
        let unmasked = FieldSet::new()
            .with(FieldName::FirstName, "Fatima")
            .with(FieldName::BirthDate, "2007-11-04")
            .with(FieldName::PersonalNumber, "20071104-1234");
        let subject = ProtectedSubject::from_unmasked(mark(2), unmasked);

        assert!(subject.validate().is_ok());
        assert_eq!(subject.masked.get(FieldName::FirstName), Some("F****"));
        assert_eq!(subject.masked.get(FieldName::BirthDate), Some("2007-**-**"));
        assert_eq!(subject.masked.get(FieldName::PersonalNumber), Some("200711-****"));
    }

    #[test]
    fn missing_masked_entry_is_rejected() {
        let mut subject = ProtectedSubject::new(mark(3));
        subject.unmasked.insert(FieldName::Address, "Storgatan 1");
        let err = subject.validate().unwrap_err();
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn mask_equal_to_true_value_is_rejected() {
        let mut subject = ProtectedSubject::new(mark(3));
        subject.unmasked.insert(FieldName::LastName, "Berg");
        subject.masked.insert(FieldName::LastName, "Berg");
        assert!(subject.validate().is_err());
    }

    #[test]
    fn mask_padded_with_whitespace_is_rejected() {
        let mut subject = ProtectedSubject::new(mark(3));
        subject.unmasked.insert(FieldName::FirstName, "Fatima");
        subject.masked.insert(FieldName::FirstName, "Fatima ");
        let err = subject.validate().unwrap_err();
        assert!(err.to_string().contains("firstName"));
    }

    #[test]
    fn mask_embedding_true_value_is_rejected() {
        let mut subject = ProtectedSubject::new(mark(3));
        subject.unmasked.insert(FieldName::LastName, "Hassan");
        subject.masked.insert(FieldName::LastName, "HASSAN (protected)");
        assert!(subject.validate().is_err());

        subject.masked.insert(FieldName::LastName, "H****");
        assert!(subject.validate().is_ok());
    }

    #[test]
    fn single_letter_names_are_fully_redacted() {
        let subject = ProtectedSubject::from_unmasked(mark(3), FieldSet::new().with(FieldName::FirstName, "A"));
        assert!(subject.validate().is_ok());
        assert_eq!(subject.masked.get(FieldName::FirstName), Some("****"));
    }

    #[test]
    fn mark_must_belong_to_subject() {
        let mut subject = ProtectedSubject::new(mark(3));
        subject.subject_id = SubjectId::new(4);
        assert!(matches!(subject.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn masked_only_fields_are_allowed() {
        let mut subject = ProtectedSubject::new(mark(5));
        subject.masked.insert(FieldName::Address, "****");
        assert!(subject.validate().is_ok());
    }
}
