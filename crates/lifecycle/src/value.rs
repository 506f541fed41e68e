//! Tri-state string values
//!
//! A value read from a plan or config is either absent (`Null`), not yet
//! known because it depends on something that has not been applied
//! (`Unknown`), or concretely present (`Known`). An empty string is a
//! `Known` value; it is never confused with `Null`.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Key used to mark an unknown value in serialized form: `{ unknown = true }`
const UNKNOWN_KEY: &str = "unknown";

/// A string attribute value that may be null, unknown or known
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum StringValue {
    /// Not set
    #[default]
    Null,
    /// Will be known after apply
    Unknown,
    /// Concrete value (possibly empty)
    Known(String),
}

impl StringValue {
    /// Create a known value
    pub fn known(value: impl Into<String>) -> Self {
        Self::Known(value.into())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is unknown
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Check if the value is known (including the empty string)
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Borrow the concrete string, if known
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Self::Known(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the concrete string only if it is known and non-empty
    pub fn as_non_empty(&self) -> Option<&str> {
        self.as_known().filter(|s| !s.is_empty())
    }
}

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self::Known(value.to_string())
    }
}

impl From<String> for StringValue {
    fn from(value: String) -> Self {
        Self::Known(value)
    }
}

impl From<Option<String>> for StringValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Unknown => write!(f, "(known after apply)"),
            Self::Known(s) => write!(f, "{s:?}"),
        }
    }
}

impl Serialize for StringValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Known(s) => serializer.serialize_str(s),
            Self::Unknown => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNKNOWN_KEY, &true)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for StringValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StringValueVisitor)
    }
}

struct StringValueVisitor;

impl<'de> Visitor<'de> for StringValueVisitor {
    type Value = StringValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string, null, or {{ {UNKNOWN_KEY} = true }}")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StringValue::Known(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(StringValue::Known(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StringValue::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(StringValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut unknown = None;
        while let Some(key) = map.next_key::<String>()? {
            if key != UNKNOWN_KEY {
                return Err(de::Error::unknown_field(&key, &[UNKNOWN_KEY]));
            }
            unknown = Some(map.next_value::<bool>()?);
        }
        match unknown {
            Some(true) => Ok(StringValue::Unknown),
            Some(false) => Err(de::Error::invalid_value(
                de::Unexpected::Bool(false),
                &"`unknown = true`",
            )),
            None => Err(de::Error::missing_field(UNKNOWN_KEY)),
        }
    }
}
