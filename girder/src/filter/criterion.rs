//! Filter criteria and categories.

use girder_model::{FieldPath, Record};
use serde::Deserialize;
use serde::Serialize;

/// One named, multi-valued filter selection applied to a category.
///
/// The applied-filter list a page owns holds at most one criterion per
/// `kind`; a criterion never has an empty `values` set (an empty selection
/// removes the criterion instead). Serialized with the wire name `type`
/// for `kind`, matching what the report endpoints accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Category key; doubles as the field path the values match against.
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name shown on the pill.
    pub label: String,
    /// Selected options, in selection order, duplicate-free.
    pub values: Vec<String>,
}

impl Criterion {
    /// Creates a criterion for a category.
    pub fn new<I, S>(kind: impl Into<String>, label: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            label: label.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the record's value for this category equals any
    /// selected option.
    ///
    /// The category key is resolved as a field path, so nested relation
    /// fields filter the same way flat fields do. Absent fields match
    /// nothing.
    pub fn matches(&self, record: &Record) -> bool {
        let resolved = FieldPath::parse(&self.kind)
            .resolve(record)
            .map(ToString::to_string)
            .unwrap_or_default();
        self.values.iter().any(|value| *value == resolved)
    }

    /// The pill text: display name plus the selected options.
    pub fn pill_text(&self) -> String {
        format!("{}: {}", self.label, self.values.join(", "))
    }
}

/// A filter category a page offers: key, display name, available options.
///
/// Categories are passed as an ordered list; the first one is the tab the
/// panel opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCategory {
    key: String,
    label: String,
    options: Vec<String>,
}

impl FilterCategory {
    /// Creates a category with its available options.
    pub fn new<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            label: label.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the category key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the available option values.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// The client-side pre-filtering stage a page runs before handing rows to
/// the table: keeps the rows that satisfy every criterion.
pub fn filter_records(records: &[Record], criteria: &[Criterion]) -> Vec<Record> {
    records
        .iter()
        .filter(|record| criteria.iter().all(|criterion| criterion.matches(record)))
        .cloned()
        .collect()
}
