//! Who may see unmasked data of protected subjects.

use std::collections::BTreeSet;

use crate::roles::{ROLE_TABLE, Role, RoleClaim};

/// Allow-list of roles that receive unmasked field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosurePolicy {
    allowed: BTreeSet<Role>,
}

impl DisclosurePolicy {
    /// Roles flagged `disclosure_allowed` in [`ROLE_TABLE`].
    pub fn standard() -> Self {
        Self {
            allowed: ROLE_TABLE
                .iter()
                .filter(|def| def.disclosure_allowed)
                .map(|def| def.role)
                .collect(),
        }
    }

    /// A policy that never discloses anything.
    pub fn masked_only() -> Self {
        Self {
            allowed: BTreeSet::new(),
        }
    }

    pub fn with_allowed(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: roles.into_iter().collect(),
        }
    }

    pub fn allowed_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.allowed.iter().copied()
    }

    /// Unknown and anonymous callers are never allowed.
    pub fn allows(&self, caller: &RoleClaim) -> bool {
        match caller {
            RoleClaim::Known(role) => self.allowed.contains(role),
            RoleClaim::Unknown(_) | RoleClaim::Anonymous => false,
        }
    }
}

impl Default for DisclosurePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_allow_list() {
        let policy = DisclosurePolicy::standard();
        let allowed: Vec<Role> = policy.allowed_roles().collect();
        assert_eq!(allowed, vec![Role::SystemAdmin, Role::MunicipalAdmin, Role::Principal]);
    }

    #[test]
    fn hierarchy_rank_does_not_imply_disclosure() {
        let policy = DisclosurePolicy::standard();
        assert!(!policy.allows(&RoleClaim::Known(Role::DevAdmin)));
        assert!(!policy.allows(&RoleClaim::Known(Role::RegionalAdmin)));
        assert!(!policy.allows(&RoleClaim::Known(Role::Teacher)));
    }

    #[test]
    fn underscore_spelling_is_the_same_role() {
        let policy = DisclosurePolicy::standard();
        assert!(policy.allows(&RoleClaim::parse("municipal_admin")));
    }

    #[test]
    fn unknown_and_anonymous_are_masked() {
        let policy = DisclosurePolicy::with_allowed(Role::ALL);
        assert!(!policy.allows(&RoleClaim::Unknown("principal ".into())));
        assert!(!policy.allows(&RoleClaim::Anonymous));
        assert!(!DisclosurePolicy::masked_only().allows(&RoleClaim::Known(Role::Principal)));
    }
}
