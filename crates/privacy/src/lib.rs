//! `edudash-privacy` — privacy marks and masked/unmasked disclosure control.
//!
//! A protected subject carries two parallel field sets: a redacted form that
//! is always safe to show, and the true values. [`PrivacyGuard`] decides per
//! caller role which of the two a display collaborator receives. Any missing
//! record, missing field or unrecognised role resolves toward masking.

pub mod error;
pub mod fields;
pub mod guard;
pub mod mark;
pub mod masking;
pub mod seed;
pub mod store;
pub mod subject;

pub use error::{PrivacyError, StoreError};
pub use fields::{FieldName, FieldSet, UnknownField};
pub use guard::{PrivacyGuard, RemovalPolicy, SupersededMark, UnknownRemovalPolicy};
pub use mark::{PrivacyMark, ProtectionType, SeverityLevel};
pub use store::{InMemorySubjectStore, SubjectStore};
pub use subject::{ProtectedSubject, SubjectView};
