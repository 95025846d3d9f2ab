//! Disclosure control for protected subjects.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::Serialize;
use thiserror::Error;

use edudash_auth::{DisclosurePolicy, RoleClaim};
use edudash_core::SubjectId;

use crate::error::{PrivacyError, StoreError};
use crate::fields::FieldName;
use crate::mark::PrivacyMark;
use crate::store::{InMemorySubjectStore, SubjectStore};
use crate::subject::{ProtectedSubject, SubjectView};

/// What removing a privacy mark leaves behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// The record is erased without trace.
    #[default]
    Erase,
    /// The record is erased from the live set but the mark is kept in the
    /// removal history.
    RetainAudit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown removal policy '{0}'")]
pub struct UnknownRemovalPolicy(pub String);

impl FromStr for RemovalPolicy {
    type Err = UnknownRemovalPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "erase" => Ok(RemovalPolicy::Erase),
            "retain-audit" | "retain_audit" => Ok(RemovalPolicy::RetainAudit),
            _ => Err(UnknownRemovalPolicy(s.to_string())),
        }
    }
}

/// A removed mark kept under [`RemovalPolicy::RetainAudit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupersededMark {
    pub mark: PrivacyMark,
    pub removed_at: DateTime<Utc>,
}

/// Resolves masked or unmasked field values for protected subjects.
///
/// Constructed once and shared by reference; each instance owns its store.
/// Reads go straight to the store. Mutations are serialized through one
/// writer lock so a check-then-insert is atomic.
pub struct PrivacyGuard<S = InMemorySubjectStore> {
    store: S,
    policy: DisclosurePolicy,
    removal: RemovalPolicy,
    /// Writer lock; also holds the removal history.
    writes: Mutex<Vec<SupersededMark>>,
}

impl PrivacyGuard<InMemorySubjectStore> {
    pub fn in_memory() -> Self {
        Self::new(InMemorySubjectStore::new())
    }

    /// An in-memory guard seeded with already-issued records.
    pub fn from_subjects(
        subjects: impl IntoIterator<Item = ProtectedSubject>,
    ) -> Result<Self, PrivacyError> {
        let guard = Self::in_memory();
        for subject in subjects {
            guard.protect_subject(subject)?;
        }
        Ok(guard)
    }
}

impl<S: SubjectStore> PrivacyGuard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: DisclosurePolicy::standard(),
            removal: RemovalPolicy::default(),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_policy(mut self, policy: DisclosurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_removal_policy(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    pub fn policy(&self) -> &DisclosurePolicy {
        &self.policy
    }

    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads (never fail; absence and store errors both mean "not protected")
    // ─────────────────────────────────────────────────────────────────────

    fn lookup(&self, subject_id: SubjectId) -> Option<ProtectedSubject> {
        match self.store.load(subject_id) {
            Ok(subject) => subject,
            Err(err) => {
                tracing::warn!(subject = %subject_id, error = %err, "subject lookup failed; treating as absent");
                None
            }
        }
    }

    pub fn is_protected(&self, subject_id: SubjectId) -> bool {
        self.lookup(subject_id).is_some()
    }

    pub fn protected_subject(&self, subject_id: SubjectId) -> Option<ProtectedSubject> {
        self.lookup(subject_id)
    }

    pub fn privacy_mark(&self, subject_id: SubjectId) -> Option<PrivacyMark> {
        self.lookup(subject_id).map(|subject| subject.mark)
    }

    /// Identifiers of every protected subject, ascending. Empty on store failure.
    pub fn protected_ids(&self) -> Vec<SubjectId> {
        self.store.list_ids().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "listing protected subjects failed");
            Vec::new()
        })
    }

    /// The masked value, regardless of who is asking. `""` if absent.
    pub fn masked_field(&self, subject_id: SubjectId, field: FieldName) -> String {
        self.lookup(subject_id)
            .and_then(|subject| subject.masked.get(field).map(str::to_owned))
            .unwrap_or_default()
    }

    /// The value `caller` may see for a protected subject's field.
    ///
    /// Returns `""` when the subject is not protected; callers fall back to
    /// their regular data source in that case. Unmasked values are only
    /// returned to roles the disclosure policy allows, and only for fields
    /// that also have a masked entry.
    pub fn resolve_field(&self, subject_id: SubjectId, field: FieldName, caller: &RoleClaim) -> String {
        let Some(subject) = self.lookup(subject_id) else {
            return String::new();
        };
        let Some(masked) = subject.masked.get(field) else {
            return String::new();
        };

        let revealed = self.policy.allows(caller);
        tracing::debug!(subject = %subject_id, field = %field, caller = %caller, revealed, "resolved protected field");

        if revealed {
            subject.unmasked.get(field).unwrap_or_default().to_string()
        } else {
            masked.to_string()
        }
    }

    /// Every field of a protected subject as `caller` may see it.
    pub fn resolve_subject(&self, subject_id: SubjectId, caller: &RoleClaim) -> Option<SubjectView> {
        let subject = self.lookup(subject_id)?;
        let revealed = self.policy.allows(caller);

        let fields = subject
            .masked
            .iter()
            .filter_map(|(field, masked)| {
                let value = if revealed { subject.unmasked.get(field)? } else { masked };
                Some((field, value.to_string()))
            })
            .collect();

        Some(SubjectView {
            subject_id,
            revealed,
            fields,
        })
    }

    /// Removal history for a subject, oldest first.
    pub fn removal_history(&self, subject_id: SubjectId) -> Vec<SupersededMark> {
        match self.writes.lock() {
            Ok(history) => history
                .iter()
                .filter(|entry| entry.mark.subject_id == subject_id)
                .cloned()
                .collect(),
            Err(_) => {
                tracing::warn!(subject = %subject_id, "removal history unavailable: writer lock poisoned");
                Vec::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Protect a previously unprotected subject with `mark`.
    ///
    /// The subject starts without field data.
    pub fn add_privacy_mark(&self, subject_id: SubjectId, mark: PrivacyMark) -> Result<(), PrivacyError> {
        if mark.subject_id != subject_id {
            return Err(PrivacyError::SubjectMismatch {
                expected: subject_id,
                found: mark.subject_id,
            });
        }
        self.insert_new(ProtectedSubject::new(mark))
    }

    /// Register a complete protected record.
    pub fn protect_subject(&self, subject: ProtectedSubject) -> Result<(), PrivacyError> {
        subject.validate()?;
        self.insert_new(subject)
    }

    fn insert_new(&self, subject: ProtectedSubject) -> Result<(), PrivacyError> {
        let _writes = self.writes.lock().map_err(|_| writer_poisoned())?;

        let subject_id = subject.subject_id;
        if self.store.load(subject_id)?.is_some() {
            tracing::warn!(subject = %subject_id, "rejecting duplicate privacy mark");
            return Err(PrivacyError::DuplicateMark(subject_id));
        }

        let protection = subject.mark.protection;
        self.store.save(subject)?;
        tracing::info!(subject = %subject_id, ?protection, "privacy mark added");
        Ok(())
    }

    /// Remove a subject's protection. Returns whether anything was removed;
    /// removing an absent mark is a no-op.
    pub fn remove_privacy_mark(&self, subject_id: SubjectId) -> Result<bool, PrivacyError> {
        self.remove_privacy_mark_at(subject_id, Utc::now())
    }

    pub fn remove_privacy_mark_at(
        &self,
        subject_id: SubjectId,
        removed_at: DateTime<Utc>,
    ) -> Result<bool, PrivacyError> {
        let mut history = self.writes.lock().map_err(|_| writer_poisoned())?;

        let Some(removed) = self.store.delete(subject_id)? else {
            tracing::debug!(subject = %subject_id, "no privacy mark to remove");
            return Ok(false);
        };

        if self.removal == RemovalPolicy::RetainAudit {
            history.push(SupersededMark {
                mark: removed.mark,
                removed_at,
            });
        }
        tracing::info!(subject = %subject_id, policy = ?self.removal, "privacy mark removed");
        Ok(true)
    }
}

fn writer_poisoned() -> PrivacyError {
    PrivacyError::Store(StoreError::Unavailable("privacy guard writer lock poisoned".to_string()))
}
