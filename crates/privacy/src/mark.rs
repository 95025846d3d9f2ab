//! Privacy marks: the authorization record behind a subject's protection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use edudash_core::{MarkId, SubjectId};

/// Why a subject's data is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtectionType {
    /// Protected population registration.
    ProtectedRegistration,
    /// Confidentiality marking in the population register.
    ConfidentialityMarking,
    WitnessProtection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    High,
    Medium,
    Low,
}

/// An issued privacy mark.
///
/// Marks are immutable once issued; the only lifecycle transition is removal
/// through [`crate::PrivacyGuard::remove_privacy_mark`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyMark {
    pub id: MarkId,
    pub subject_id: SubjectId,
    pub protection: ProtectionType,
    pub level: SeverityLevel,
    pub reason: String,
    pub effective_date: NaiveDate,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub authorized_by: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PrivacyMark {
    /// Whether `on` falls inside the mark's validity window.
    ///
    /// Informational only: an expired mark still masks until it is removed.
    pub fn is_in_effect(&self, on: NaiveDate) -> bool {
        on >= self.effective_date && self.expiry_date.is_none_or(|expiry| on < expiry)
    }
}
