//! The access-control context handed to display collaborators.

use edudash_auth::{
    AuthorizationExplanation, Feature, Role, RoleClaim, RoleFallback, RoleHierarchy, explain_authorization,
};
use edudash_core::SubjectId;
use edudash_privacy::{FieldName, PrivacyError, PrivacyGuard, SubjectView, seed};

use crate::config::AppConfig;

/// Everything a request needs to decide what a caller may do and see.
///
/// Built once at startup and passed by reference.
pub struct AccessContext {
    hierarchy: RoleHierarchy,
    guard: PrivacyGuard,
    fallback: RoleFallback,
}

impl AccessContext {
    pub fn new(hierarchy: RoleHierarchy, guard: PrivacyGuard, fallback: RoleFallback) -> Self {
        Self {
            hierarchy,
            guard,
            fallback,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PrivacyError> {
        let subjects = match &config.seed_path {
            Some(path) => seed::from_json_file(path)?,
            None => seed::demo_subjects()?,
        };
        tracing::info!(
            subjects = subjects.len(),
            seed = ?config.seed_path,
            removal = ?config.removal,
            "loaded protected subjects"
        );

        let guard = PrivacyGuard::from_subjects(subjects)?.with_removal_policy(config.removal);
        Ok(Self::new(RoleHierarchy::standard(), guard, config.fallback))
    }

    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    pub fn guard(&self) -> &PrivacyGuard {
        &self.guard
    }

    /// Resolve the caller's raw role through the configured fallback.
    pub fn caller(&self, raw_role: Option<&str>) -> RoleClaim {
        self.fallback.resolve(raw_role)
    }

    pub fn menu(&self, raw_role: Option<&str>) -> Vec<Feature> {
        Feature::accessible(&self.hierarchy, &self.caller(raw_role))
    }

    pub fn resolve_field(&self, subject_id: SubjectId, field: FieldName, raw_role: Option<&str>) -> String {
        self.guard.resolve_field(subject_id, field, &self.caller(raw_role))
    }

    /// Like [`Self::resolve_field`] for an untrusted field name. Names that
    /// are not sensitive fields resolve to `""`.
    pub fn resolve_named_field(&self, subject_id: SubjectId, field: &str, raw_role: Option<&str>) -> String {
        match field.parse::<FieldName>() {
            Ok(field) => self.resolve_field(subject_id, field, raw_role),
            Err(err) => {
                tracing::debug!(subject = %subject_id, error = %err, "not a protected field");
                String::new()
            }
        }
    }

    pub fn view(&self, subject_id: SubjectId, raw_role: Option<&str>) -> Option<SubjectView> {
        self.guard.resolve_subject(subject_id, &self.caller(raw_role))
    }

    /// The subject view as pretty JSON; `null` when the subject is not protected.
    pub fn view_json(&self, subject_id: SubjectId, raw_role: Option<&str>) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.view(subject_id, raw_role))
    }

    pub fn explain(&self, raw_role: Option<&str>, required: Role) -> AuthorizationExplanation {
        explain_authorization(&self.hierarchy, &self.caller(raw_role), required)
    }
}
