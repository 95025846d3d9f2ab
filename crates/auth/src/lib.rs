//! `edudash-auth` — pure role-based access boundary.
//!
//! This crate is intentionally decoupled from UI and storage. Every role the
//! dashboard knows about is a [`Role`]; untrusted role strings become a
//! [`RoleClaim`] and anything that is not a known role is denied.

pub mod authorize;
pub mod disclosure;
pub mod features;
pub mod hierarchy;
pub mod roles;

pub use authorize::{AuthorizationExplanation, AuthzError, DenialKind, authorize, explain_authorization};
pub use disclosure::DisclosurePolicy;
pub use features::{Feature, UnknownFeature};
pub use hierarchy::{DEFAULT_ROLE_FALLBACK, RoleFallback, RoleHierarchy, is_authorized};
pub use roles::{ROLE_TABLE, Role, RoleClaim, RoleDefinition, UnknownRole};
