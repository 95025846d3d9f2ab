//! Field names of protected subject records.

use std::collections::BTreeMap;

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sensitive attributes the dashboard displays for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    BirthDate,
    Address,
    PersonalNumber,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::BirthDate,
        FieldName::Address,
        FieldName::PersonalNumber,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::BirthDate => "birthDate",
            FieldName::Address => "address",
            FieldName::PersonalNumber => "personalNumber",
        }
    }
}

impl core::fmt::Display for FieldName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// One representation (masked or unmasked) of a subject's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<FieldName, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) -> Option<String> {
        self.0.insert(field, value.into())
    }

    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(FieldName, String)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_match_dashboard_attributes() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
        assert_eq!("FirstName".parse::<FieldName>(), Err(UnknownField("FirstName".into())));
    }

    #[test]
    fn field_set_serializes_as_object() {
        let set = FieldSet::new()
            .with(FieldName::FirstName, "F****")
            .with(FieldName::BirthDate, "2007-**-**");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({ "firstName": "F****", "birthDate": "2007-**-**" }));

        let back: FieldSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
