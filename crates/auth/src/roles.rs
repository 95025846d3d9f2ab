use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Every role known to the dashboard.
///
/// The administrative hierarchy roles and the roles used when deciding who may
/// see unmasked student data live in one vocabulary. What each role may do is
/// looked up in [`ROLE_TABLE`]; nothing else in the workspace spells out role
/// names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    DevAdmin,
    RegionalAdmin,
    MunicipalityAdmin,
    SchoolAdmin,
    OrgAdmin,
    SystemAdmin,
    MunicipalAdmin,
    Principal,
    Teacher,
}

/// Static facts about a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefinition {
    pub role: Role,
    /// Canonical wire name.
    pub slug: &'static str,
    /// Position in the administrative hierarchy (0 = most privileged).
    /// Roles without a rank never satisfy a hierarchy check.
    pub rank: Option<u8>,
    /// Whether the role may see unmasked data of protected subjects.
    pub disclosure_allowed: bool,
    pub description: &'static str,
}

/// The role table. Indexed by `Role as usize`.
pub const ROLE_TABLE: &[RoleDefinition] = &[
    RoleDefinition {
        role: Role::DevAdmin,
        slug: "devadmin",
        rank: Some(0),
        disclosure_allowed: false,
        description: "Platform developer with access to every administrative screen",
    },
    RoleDefinition {
        role: Role::RegionalAdmin,
        slug: "regional-admin",
        rank: Some(1),
        disclosure_allowed: false,
        description: "Regional administrator overseeing several municipalities",
    },
    RoleDefinition {
        role: Role::MunicipalityAdmin,
        slug: "municipality-admin",
        rank: Some(2),
        disclosure_allowed: false,
        description: "Municipality administrator managing schools and price lists",
    },
    RoleDefinition {
        role: Role::SchoolAdmin,
        slug: "school-admin",
        rank: Some(3),
        disclosure_allowed: false,
        description: "School administrator",
    },
    RoleDefinition {
        role: Role::OrgAdmin,
        slug: "orgadmin",
        rank: Some(4),
        disclosure_allowed: false,
        description: "Organisation administrator for an independent provider",
    },
    RoleDefinition {
        role: Role::SystemAdmin,
        slug: "system-admin",
        rank: None,
        disclosure_allowed: true,
        description: "System administrator cleared for protected records",
    },
    RoleDefinition {
        role: Role::MunicipalAdmin,
        slug: "municipal-admin",
        rank: None,
        disclosure_allowed: true,
        description: "Municipal case officer cleared for protected records",
    },
    RoleDefinition {
        role: Role::Principal,
        slug: "principal",
        rank: None,
        disclosure_allowed: true,
        description: "School principal cleared for protected records",
    },
    RoleDefinition {
        role: Role::Teacher,
        slug: "teacher",
        rank: None,
        disclosure_allowed: false,
        description: "Teaching staff",
    },
];

impl Role {
    pub const ALL: [Role; 9] = [
        Role::DevAdmin,
        Role::RegionalAdmin,
        Role::MunicipalityAdmin,
        Role::SchoolAdmin,
        Role::OrgAdmin,
        Role::SystemAdmin,
        Role::MunicipalAdmin,
        Role::Principal,
        Role::Teacher,
    ];

    pub fn definition(self) -> &'static RoleDefinition {
        &ROLE_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.definition().slug
    }

    pub fn rank(self) -> Option<u8> {
        self.definition().rank
    }

    pub fn disclosure_allowed(self) -> bool {
        self.definition().disclosure_allowed
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ROLE_TABLE
            .iter()
            .find(|def| def.slug == normalized)
            .map(|def| def.role)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A caller's role as presented at the boundary.
///
/// Only `Known` can ever be granted anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleClaim {
    Known(Role),
    /// A role string that is not in the vocabulary.
    Unknown(String),
    /// No role was presented and the call site chose not to assume one.
    Anonymous,
}

impl RoleClaim {
    /// Parse an untrusted role string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => RoleClaim::Known(role),
            Err(_) => {
                tracing::debug!(role = raw, "unrecognised role claim");
                RoleClaim::Unknown(raw.to_string())
            }
        }
    }

    pub fn known(&self) -> Option<Role> {
        match self {
            RoleClaim::Known(role) => Some(*role),
            RoleClaim::Unknown(_) | RoleClaim::Anonymous => None,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(role: Role) -> Self {
        RoleClaim::Known(role)
    }
}

impl core::fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RoleClaim::Known(role) => write!(f, "{}", role),
            RoleClaim::Unknown(raw) => write!(f, "unknown({})", raw),
            RoleClaim::Anonymous => f.write_str("anonymous"),
        }
    }
}
