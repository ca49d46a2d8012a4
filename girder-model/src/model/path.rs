//! Dot-path field access

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::Record;
use super::Value;

/// A dot-separated path into a [`Record`], e.g. `"salesman.name"`.
///
/// Column keys and search keys are field paths, so a column can address a
/// field of an expanded relation the same way it addresses a flat field.
/// Parsing and resolution are total: there is no invalid path, and
/// [`resolve`](FieldPath::resolve) returns `None` rather than failing when
/// anything along the path is absent.
///
/// # Example
///
/// ```
/// use girder_model::{FieldPath, Record};
///
/// let row = Record::new().set("salesman", Record::new().set("name", "Ana"));
/// let path = FieldPath::parse("salesman.name");
/// assert_eq!(path.resolve(&row).map(ToString::to_string), Some("Ana".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path. Empty segments are discarded, so `""` and
    /// `"a..b"` are well-formed (the former resolves to nothing).
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolves the path against a record, walking nested records segment
    /// by segment.
    ///
    /// Returns `None` for an empty path, a missing segment, or a null or
    /// non-record intermediate. A leaf that exists but is `Value::Null` is
    /// returned as-is; the distinction matters to typed callers, while
    /// search and sort treat both as empty.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        let (leaf, ancestors) = self.segments.split_last()?;
        let mut current = record;
        for segment in ancestors {
            match current.get(segment)? {
                Value::Record(nested) => current = nested,
                _ => return None,
            }
        }
        current.get(leaf)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl FromStr for FieldPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Ok(Self::parse(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Record {
        Record::new()
            .set("id", 7i64)
            .set("salesman", Record::new().set("name", "Ana"))
    }

    #[test]
    fn test_resolves_flat_field() {
        let path = FieldPath::parse("id");
        assert_eq!(path.resolve(&ana()), Some(&Value::Int(7)));
    }

    #[test]
    fn test_resolves_nested_field() {
        let row = ana();
        let resolved = FieldPath::parse("salesman.name").resolve(&row);
        assert_eq!(resolved, Some(&Value::String("Ana".into())));
    }

    #[test]
    fn test_null_intermediate_is_absent() {
        let row = Record::new().set("salesman", Value::Null);
        assert_eq!(FieldPath::parse("salesman.name").resolve(&row), None);
    }

    #[test]
    fn test_missing_segment_is_absent() {
        let row = ana();
        assert_eq!(FieldPath::parse("salesman.phone.area").resolve(&row), None);
        assert_eq!(FieldPath::parse("owner.name").resolve(&row), None);
    }

    #[test]
    fn test_empty_path_is_absent() {
        assert_eq!(FieldPath::parse("").resolve(&ana()), None);
    }

    #[test]
    fn test_non_record_intermediate_is_absent() {
        let row = Record::new().set("salesman", "Ana");
        assert_eq!(FieldPath::parse("salesman.name").resolve(&row), None);
    }

    #[test]
    fn test_display_round_trip() {
        let path = FieldPath::parse("salesman.name");
        assert_eq!(path.to_string(), "salesman.name");
        assert_eq!(FieldPath::from(path.to_string()), path);
    }
}
