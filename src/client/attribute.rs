//! Per-field value holder distinguishing "not fetched" from "fetched"

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One field of an entity.
///
/// An attribute starts `Unset` and is replaced wholesale whenever new
/// response data for its field arrives. It never goes back to `Unset`.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<T> {
    /// Not present in any response seen so far
    Unset,
    /// Fetched; `None` means the server sent `null`
    Present(Option<T>),
    /// Fetched, but the JSON type did not match the field's kind
    Bad {
        field: &'static str,
        expected: &'static str,
    },
}

impl<T> Default for Attribute<T> {
    fn default() -> Self {
        Attribute::Unset
    }
}

impl<T> Attribute<T> {
    pub fn is_set(&self) -> bool {
        !self.is_unset()
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Attribute::Unset)
    }

    /// Read the value. Unset and null both read as `Ok(None)`.
    pub fn value(&self) -> Result<Option<&T>> {
        match self {
            Attribute::Unset => Ok(None),
            Attribute::Present(value) => Ok(value.as_ref()),
            Attribute::Bad { field, expected } => Err(Error::BadAttribute {
                field: *field,
                expected: *expected,
            }),
        }
    }

    /// Peek at a well-formed, non-null value without any error path.
    pub fn known(&self) -> Option<&T> {
        match self {
            Attribute::Present(Some(value)) => Some(value),
            _ => None,
        }
    }

    fn from_json(
        field: &'static str,
        expected: &'static str,
        value: &Value,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Self {
        if value.is_null() {
            return Attribute::Present(None);
        }
        match convert(value) {
            Some(v) => Attribute::Present(Some(v)),
            None => Attribute::Bad { field, expected },
        }
    }

    /// Build a nested entity attribute from a JSON object fragment.
    pub fn entity(
        field: &'static str,
        value: &Value,
        build: impl FnOnce(&Map<String, Value>) -> T,
    ) -> Self {
        Self::from_json(field, "object", value, |v| v.as_object().map(build))
    }
}

impl Attribute<u64> {
    pub fn int(field: &'static str, value: &Value) -> Self {
        Self::from_json(field, "integer", value, Value::as_u64)
    }

    /// Read by value
    pub fn copied(&self) -> Result<Option<u64>> {
        Ok(self.value()?.copied())
    }
}

impl Attribute<String> {
    pub fn string(field: &'static str, value: &Value) -> Self {
        Self::from_json(field, "string", value, |v| v.as_str().map(str::to_string))
    }

    /// Read as `&str`
    pub fn as_str(&self) -> Result<Option<&str>> {
        Ok(self.value()?.map(String::as_str))
    }
}

impl Attribute<bool> {
    pub fn bool(field: &'static str, value: &Value) -> Self {
        Self::from_json(field, "boolean", value, Value::as_bool)
    }

    /// Read by value
    pub fn copied(&self) -> Result<Option<bool>> {
        Ok(self.value()?.copied())
    }
}

impl Attribute<DateTime<Utc>> {
    /// RFC 3339 timestamps such as `2011-01-26T19:01:12Z`
    pub fn datetime(field: &'static str, value: &Value) -> Self {
        Self::from_json(field, "RFC 3339 timestamp", value, |v| {
            v.as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}

impl<T: Serialize> Serialize for Attribute<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Attribute::Present(Some(value)) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_unset() {
        let attr: Attribute<u64> = Attribute::default();
        assert!(attr.is_unset());
        assert!(!attr.is_set());
        assert_eq!(attr.value().unwrap(), None);
    }

    #[test]
    fn test_int_attribute() {
        let attr = Attribute::int("id", &json!(42));
        assert!(attr.is_set());
        assert_eq!(attr.value().unwrap(), Some(&42));
        assert_eq!(attr.known(), Some(&42));
    }

    #[test]
    fn test_null_is_set_but_empty() {
        let attr = Attribute::string("description", &Value::Null);
        assert!(attr.is_set());
        assert_eq!(attr.as_str().unwrap(), None);
        assert_eq!(attr.known(), None);
    }

    #[test]
    fn test_wrong_type_reads_as_bad_attribute() {
        let attr = Attribute::int("members_count", &json!("seven"));
        assert!(attr.is_set());
        assert_eq!(attr.known(), None);
        match attr.value() {
            Err(Error::BadAttribute { field, expected }) => {
                assert_eq!(field, "members_count");
                assert_eq!(expected, "integer");
            }
            other => panic!("Expected BadAttribute, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_number_is_not_an_id() {
        let attr = Attribute::int("id", &json!(-1));
        assert!(attr.value().is_err());
    }

    #[test]
    fn test_bool_attribute() {
        assert_eq!(Attribute::bool("private", &json!(true)).known(), Some(&true));
        assert!(Attribute::bool("private", &json!(1)).value().is_err());
    }

    #[test]
    fn test_datetime_attribute() {
        let attr = Attribute::datetime("created_at", &json!("2011-01-26T19:01:12Z"));
        let dt = attr.known().expect("parsed");
        assert_eq!(dt.to_rfc3339(), "2011-01-26T19:01:12+00:00");

        let bad = Attribute::datetime("created_at", &json!("yesterday"));
        assert!(bad.value().is_err());
    }

    #[test]
    fn test_entity_attribute_requires_object() {
        let attr = Attribute::entity("parent", &json!({"id": 3}), |map| map.len());
        assert_eq!(attr.known(), Some(&1));

        let bad = Attribute::entity("parent", &json!([1, 2]), |map| map.len());
        assert!(matches!(bad, Attribute::Bad { field: "parent", .. }));
    }

    #[test]
    fn test_serialize_emits_value_or_null() {
        let present = Attribute::string("name", &json!("Justice League"));
        assert_eq!(serde_json::to_value(&present).unwrap(), json!("Justice League"));

        let null: Attribute<String> = Attribute::Present(None);
        assert_eq!(serde_json::to_value(&null).unwrap(), Value::Null);
    }
}
