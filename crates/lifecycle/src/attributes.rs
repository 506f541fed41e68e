//! Attribute maps - the untyped form of plans, configs and states

use crate::error::{Error, Result};
use crate::value::StringValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static NULL: StringValue = StringValue::Null;

/// An ordered map of attribute name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, StringValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute; a missing attribute reads as `Null`
    pub fn get(&self, name: &str) -> &StringValue {
        self.0.get(name).unwrap_or(&NULL)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<StringValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder form of [`Attributes::set`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<StringValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StringValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Convert to the form stored in a state file
    ///
    /// Fails if any attribute is still unknown.
    pub fn to_persisted(&self) -> Result<BTreeMap<String, Option<String>>> {
        self.0
            .iter()
            .map(|(name, value)| match value {
                StringValue::Unknown => Err(Error::UnknownValueInState(name.clone())),
                StringValue::Null => Ok((name.clone(), None)),
                StringValue::Known(s) => Ok((name.clone(), Some(s.clone()))),
            })
            .collect()
    }

    /// Rebuild from the form stored in a state file
    pub fn from_persisted(persisted: &BTreeMap<String, Option<String>>) -> Self {
        Self(
            persisted
                .iter()
                .map(|(name, value)| (name.clone(), StringValue::from(value.clone())))
                .collect(),
        )
    }
}

impl FromIterator<(String, StringValue)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, StringValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reads_as_null() {
        let attrs = Attributes::new().with("value", "x");
        assert_eq!(attrs.get("value"), &StringValue::known("x"));
        assert!(attrs.get("default_value").is_null());
        assert!(!attrs.contains("default_value"));
    }

    #[test]
    fn test_persisted_rejects_unknown() {
        let attrs = Attributes::new()
            .with("value", StringValue::Null)
            .with("result", StringValue::Unknown);
        assert!(matches!(
            attrs.to_persisted(),
            Err(Error::UnknownValueInState(name)) if name == "result"
        ));
    }

    #[test]
    fn test_persisted_keeps_null_and_empty_apart() {
        let attrs = Attributes::new()
            .with("value", StringValue::Null)
            .with("result", "");
        let persisted = attrs.to_persisted().unwrap();
        assert_eq!(persisted["value"], None);
        assert_eq!(persisted["result"], Some(String::new()));
        assert_eq!(Attributes::from_persisted(&persisted), attrs);
    }
}
