use serde::Serialize;
use thiserror::Error;

use crate::hierarchy::RoleHierarchy;
use crate::roles::{Role, RoleClaim};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("no role presented")]
    Anonymous,

    #[error("role '{0}' is not part of the hierarchy")]
    Unranked(Role),

    #[error("required role '{0}' is not part of the hierarchy")]
    UnrankedRequirement(Role),

    #[error("forbidden: role '{caller}' does not satisfy '{required}'")]
    Forbidden { caller: Role, required: Role },
}

/// Authorize `caller` for an action requiring `required`.
///
/// - No IO
/// - No panics
/// - Unknown, anonymous and unranked callers are denied
/// - Nothing satisfies an unranked requirement
pub fn authorize(hierarchy: &RoleHierarchy, caller: &RoleClaim, required: Role) -> Result<(), AuthzError> {
    let caller_role = match caller {
        RoleClaim::Known(role) => *role,
        RoleClaim::Unknown(raw) => {
            tracing::warn!(role = raw.as_str(), required = %required, "denying unknown role");
            return Err(AuthzError::UnknownRole(raw.clone()));
        }
        RoleClaim::Anonymous => return Err(AuthzError::Anonymous),
    };

    if hierarchy.position(caller_role).is_none() {
        return Err(AuthzError::Unranked(caller_role));
    }

    if hierarchy.position(required).is_none() {
        return Err(AuthzError::UnrankedRequirement(required));
    }

    if hierarchy.is_authorized(caller, &RoleClaim::Known(required)) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            caller: caller_role,
            required,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    pub caller: String,
    pub required: Role,
    pub granted: bool,
    /// Human-readable reason for the decision.
    pub reason: String,
    /// Hierarchy position of the caller, if it has one.
    pub caller_position: Option<usize>,
    pub required_position: Option<usize>,
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    UnknownRole,
    Anonymous,
    Unranked,
    UnrankedRequirement,
    InsufficientRole,
}

/// Explain why an authorization decision was made (or would be made).
///
/// Always agrees with [`authorize`].
pub fn explain_authorization(
    hierarchy: &RoleHierarchy,
    caller: &RoleClaim,
    required: Role,
) -> AuthorizationExplanation {
    let caller_position = hierarchy.rank_of(caller);
    let required_position = hierarchy.position(required);

    let (granted, reason, denial) = match authorize(hierarchy, caller, required) {
        Ok(()) => (
            true,
            format!("Role '{}' is at or above '{}' in the hierarchy", caller, required),
            None,
        ),
        Err(AuthzError::UnknownRole(raw)) => (
            false,
            format!("Role '{}' is not a known role; unknown roles are denied", raw),
            Some(DenialKind::UnknownRole),
        ),
        Err(AuthzError::Anonymous) => (
            false,
            "No role was presented and no fallback role was assumed".to_string(),
            Some(DenialKind::Anonymous),
        ),
        Err(AuthzError::Unranked(role)) => (
            false,
            format!("Role '{}' has no position in the administrative hierarchy", role),
            Some(DenialKind::Unranked),
        ),
        Err(AuthzError::UnrankedRequirement(role)) => (
            false,
            format!("Required role '{}' has no position in the administrative hierarchy", role),
            Some(DenialKind::UnrankedRequirement),
        ),
        Err(err @ AuthzError::Forbidden { .. }) => {
            (false, err.to_string(), Some(DenialKind::InsufficientRole))
        }
    };

    AuthorizationExplanation {
        caller: caller.to_string(),
        required,
        granted,
        reason,
        caller_position,
        required_position,
        denial,
    }
}
