//! Role hierarchy permission checks.

use core::str::FromStr;

use edudash_core::{DomainError, DomainResult};

use crate::roles::{ROLE_TABLE, Role, RoleClaim, UnknownRole};

/// A fixed total order over roles. Lower position = more privileged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleHierarchy {
    order: Vec<Role>,
}

impl RoleHierarchy {
    /// The dashboard hierarchy, built from the ranks in [`ROLE_TABLE`].
    pub fn standard() -> Self {
        let mut ranked: Vec<(u8, Role)> = ROLE_TABLE
            .iter()
            .filter_map(|def| def.rank.map(|rank| (rank, def.role)))
            .collect();
        ranked.sort_by_key(|(rank, _)| *rank);

        Self {
            order: ranked.into_iter().map(|(_, role)| role).collect(),
        }
    }

    /// Build a custom hierarchy, most privileged role first.
    pub fn from_order(order: Vec<Role>) -> DomainResult<Self> {
        if order.is_empty() {
            return Err(DomainError::validation("role hierarchy cannot be empty"));
        }
        for (i, role) in order.iter().enumerate() {
            if order[..i].contains(role) {
                return Err(DomainError::validation(format!(
                    "role '{}' appears more than once in the hierarchy",
                    role
                )));
            }
        }
        Ok(Self { order })
    }

    pub fn roles(&self) -> &[Role] {
        &self.order
    }

    pub fn position(&self, role: Role) -> Option<usize> {
        self.order.iter().position(|r| *r == role)
    }

    /// Whether `caller` satisfies a requirement of `required`.
    ///
    /// Both sides must be known roles that are part of this hierarchy;
    /// anything else is denied.
    pub fn is_authorized(&self, caller: &RoleClaim, required: &RoleClaim) -> bool {
        match (self.rank_of(caller), self.rank_of(required)) {
            (Some(caller_pos), Some(required_pos)) => caller_pos <= required_pos,
            _ => false,
        }
    }

    pub(crate) fn rank_of(&self, claim: &RoleClaim) -> Option<usize> {
        match claim {
            RoleClaim::Known(role) => self.position(*role),
            RoleClaim::Unknown(_) | RoleClaim::Anonymous => None,
        }
    }
}

impl Default for RoleHierarchy {
    fn default() -> Self {
        Self::standard()
    }
}

/// [`RoleHierarchy::is_authorized`] against the standard hierarchy.
pub fn is_authorized(caller: &RoleClaim, required: &RoleClaim) -> bool {
    match (caller.known().and_then(Role::rank), required.known().and_then(Role::rank)) {
        (Some(caller_rank), Some(required_rank)) => caller_rank <= required_rank,
        _ => false,
    }
}

/// What to do when a caller presents no role at all.
///
/// This is chosen at the call site and never applied implicitly by the
/// permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFallback {
    /// Treat an absent role as this role.
    AssumeRole(Role),
    /// Treat an absent role as [`RoleClaim::Anonymous`].
    Deny,
}

/// The dashboard's historical behaviour: a signed-in user without a role is
/// treated as a regional administrator.
pub const DEFAULT_ROLE_FALLBACK: RoleFallback = RoleFallback::AssumeRole(Role::RegionalAdmin);

impl RoleFallback {
    /// Turn an optional raw role string into a claim.
    ///
    /// Blank strings count as absent. A present but unrecognised string is
    /// never replaced by the fallback role.
    pub fn resolve(&self, raw: Option<&str>) -> RoleClaim {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => RoleClaim::parse(raw),
            None => match self {
                RoleFallback::AssumeRole(role) => RoleClaim::Known(*role),
                RoleFallback::Deny => RoleClaim::Anonymous,
            },
        }
    }
}

impl Default for RoleFallback {
    fn default() -> Self {
        DEFAULT_ROLE_FALLBACK
    }
}

impl FromStr for RoleFallback {
    type Err = UnknownRole;

    /// `deny` or a role slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("deny") {
            return Ok(RoleFallback::Deny);
        }
        s.parse::<Role>().map(RoleFallback::AssumeRole)
    }
}
