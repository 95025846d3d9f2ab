use thiserror::Error;

use edudash_core::{DomainError, SubjectId};

/// Failure of the backing subject store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("subject store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by mutating privacy operations.
///
/// Read operations never return these; a missing or unreadable record is
/// reported as "not protected" and resolves to masked/empty output.
#[derive(Debug, Error)]
pub enum PrivacyError {
    #[error("subject {0} already has a privacy mark")]
    DuplicateMark(SubjectId),

    #[error("privacy mark is issued for subject {found}, not {expected}")]
    SubjectMismatch { expected: SubjectId, found: SubjectId },

    #[error("invalid protected subject: {0}")]
    InvalidSubject(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed seed data: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("failed to read seed data: {0}")]
    SeedIo(#[from] std::io::Error),
}
