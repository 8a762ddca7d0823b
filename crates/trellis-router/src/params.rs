//! Parameter values extracted from a matched path
//!
//! A dynamic segment binds a single string, a catch-all binds an ordered
//! sequence. An optional catch-all that captured nothing binds an empty
//! sequence, which is distinct from the key being absent.

use std::collections::hash_map::{self, HashMap};
use std::fmt;

use serde::Serialize;

/// Value bound to one parameter name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Captured by a `[name]` segment
    One(String),
    /// Captured by a `[...name]` or `[[...name]]` segment
    Many(Vec<String>),
}

impl ParamValue {
    /// Returns the single value, if this came from a dynamic segment
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::One(value) => Some(value),
            ParamValue::Many(_) => None,
        }
    }

    /// Returns the ordered values, if this came from a catch-all segment
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            ParamValue::One(_) => None,
            ParamValue::Many(values) => Some(values),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::One(value) => value.is_empty(),
            ParamValue::Many(values) => values.is_empty(),
        }
    }
}

impl fmt::Display for ParamValue {
    /// Catch-all values are shown joined with `/`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::One(value) => f.write_str(value),
            ParamValue::Many(values) => f.write_str(&values.join("/")),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::One(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        ParamValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Mapping from parameter name to its value, created fresh per match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    values: HashMap<String, ParamValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, consuming and returning the map
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_router::ParameterMap;
    ///
    /// let params = ParameterMap::new()
    ///     .with("blogID", "42")
    ///     .with("filePath", ["a", "b"]);
    ///
    /// assert_eq!(params.get_str("blogID"), Some("42"));
    /// assert_eq!(params.get_all("filePath").map(|v| v.len()), Some(2));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a parameter, returning the previous value for that name
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Single value of a dynamic parameter
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    /// Ordered values of a catch-all parameter
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(ParamValue::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, ParamValue> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = hash_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_catch_all_is_not_absent() {
        let params = ParameterMap::new().with("filePath", ParamValue::Many(vec![]));

        assert!(params.contains("filePath"));
        assert_eq!(params.get_all("filePath"), Some(&[][..]));
        assert!(params.get("other").is_none());
    }

    #[test]
    fn test_accessors_respect_kind() {
        let params = ParameterMap::new()
            .with("id", "7")
            .with("rest", vec!["a", "b"]);

        assert_eq!(params.get_str("id"), Some("7"));
        assert_eq!(params.get_all("id"), None);
        assert_eq!(params.get_str("rest"), None);
        assert_eq!(params.get("rest").map(ToString::to_string), Some("a/b".into()));
    }

    #[test]
    fn test_from_pairs() {
        let params: ParameterMap = [("blogID", "1"), ("commentID", "2")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get_str("commentID"), Some("2"));
    }

    #[test]
    fn test_serializes_values_untagged() {
        let params = ParameterMap::new().with("filePath", ["a", "b"]);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "filePath": ["a", "b"] }));
    }
}
