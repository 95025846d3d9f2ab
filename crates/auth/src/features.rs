//! Administrative screens gated by the role hierarchy.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::RoleHierarchy;
use crate::roles::{Role, RoleClaim};

/// A dashboard feature (menu entry) and the least privileged role that may
/// open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    PriceLists,
    PaymentBlocks,
    AccountingStrings,
    ErrorLists,
    PrivacyMarks,
    RoleAdministration,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::PriceLists,
        Feature::PaymentBlocks,
        Feature::AccountingStrings,
        Feature::ErrorLists,
        Feature::PrivacyMarks,
        Feature::RoleAdministration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::PriceLists => "price-lists",
            Feature::PaymentBlocks => "payment-blocks",
            Feature::AccountingStrings => "accounting-strings",
            Feature::ErrorLists => "error-lists",
            Feature::PrivacyMarks => "privacy-marks",
            Feature::RoleAdministration => "role-administration",
        }
    }

    pub fn required_role(self) -> Role {
        match self {
            Feature::PriceLists | Feature::PaymentBlocks => Role::MunicipalityAdmin,
            Feature::AccountingStrings | Feature::PrivacyMarks => Role::RegionalAdmin,
            Feature::ErrorLists => Role::SchoolAdmin,
            Feature::RoleAdministration => Role::DevAdmin,
        }
    }

    pub fn is_accessible(self, hierarchy: &RoleHierarchy, caller: &RoleClaim) -> bool {
        hierarchy.is_authorized(caller, &RoleClaim::Known(self.required_role()))
    }

    /// Menu entries visible to `caller`, in menu order.
    pub fn accessible(hierarchy: &RoleHierarchy, caller: &RoleClaim) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| f.is_accessible(hierarchy, caller))
            .collect()
    }
}

impl core::fmt::Display for Feature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown feature '{0}'")]
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devadmin_sees_every_menu_entry() {
        let h = RoleHierarchy::standard();
        let menu = Feature::accessible(&h, &RoleClaim::Known(Role::DevAdmin));
        assert_eq!(menu, Feature::ALL.to_vec());
    }

    #[test]
    fn school_admin_sees_only_error_lists() {
        let h = RoleHierarchy::standard();
        let menu = Feature::accessible(&h, &RoleClaim::Known(Role::SchoolAdmin));
        assert_eq!(menu, vec![Feature::ErrorLists]);
    }

    #[test]
    fn municipality_admin_menu() {
        let h = RoleHierarchy::standard();
        let menu = Feature::accessible(&h, &RoleClaim::Known(Role::MunicipalityAdmin));
        assert_eq!(
            menu,
            vec![Feature::PriceLists, Feature::PaymentBlocks, Feature::ErrorLists]
        );
    }

    #[test]
    fn unknown_role_gets_empty_menu() {
        let h = RoleHierarchy::standard();
        assert!(Feature::accessible(&h, &RoleClaim::parse("hacker")).is_empty());
        assert!(Feature::accessible(&h, &RoleClaim::Known(Role::Principal)).is_empty());
    }

    #[test]
    fn names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>().unwrap(), feature);
        }
        assert_eq!("ledger".parse::<Feature>(), Err(UnknownFeature("ledger".into())));
    }
}
