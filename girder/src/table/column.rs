//! Column descriptors and cell display.

use std::fmt;
use std::sync::Arc;

use girder_model::{FieldPath, Record};

use crate::utils::text::truncate_to_width;

/// Maximum cell text width in display columns before truncation.
pub const MAX_CELL_WIDTH: usize = 20;

/// Placeholder shown for empty or absent cell values.
pub const EMPTY_CELL: &str = "-";

/// Caller-supplied cell renderer; its output fully overrides the default
/// cell display for the column.
pub type CellRenderer = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Column width specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Flexible width with weight.
    Flex(u16),
    /// Auto-size to content.
    Auto,
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth::Flex(1)
    }
}

/// A table column definition.
///
/// The key is a dot path into a row, so a column can address a field of an
/// expanded relation (`"salesman.name"`) the same way it addresses a flat
/// field. Columns are sortable unless opted out.
#[derive(Clone)]
pub struct Column {
    /// Field path resolved against each row.
    pub key: FieldPath,
    /// Header text displayed at the top.
    pub header: String,
    /// Width specification.
    pub width: ColumnWidth,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Optional display override.
    render: Option<CellRenderer>,
}

impl Column {
    /// Create a new sortable column with the given key and header.
    pub fn new(key: &str, header: impl Into<String>) -> Self {
        Self {
            key: FieldPath::parse(key),
            header: header.into(),
            width: ColumnWidth::default(),
            sortable: true,
            render: None,
        }
    }

    /// Set a fixed width for this column.
    pub fn fixed(mut self, width: u16) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    /// Set a flex width for this column.
    pub fn flex(mut self, weight: u16) -> Self {
        self.width = ColumnWidth::Flex(weight);
        self
    }

    /// Set auto width for this column.
    pub fn auto(mut self) -> Self {
        self.width = ColumnWidth::Auto;
        self
    }

    /// Set whether this column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set a display override for this column.
    ///
    /// Sortability is unaffected: sorting always goes through the column
    /// key and the comparator, not the rendered text.
    pub fn render(mut self, render: impl Fn(&Record) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Derive the display cell for one row.
    ///
    /// With a render override the returned text is used verbatim. The
    /// default display resolves the column key, truncates long text to
    /// [`MAX_CELL_WIDTH`] display columns (keeping the full value as a
    /// tooltip), and substitutes [`EMPTY_CELL`] for empty or absent values.
    pub fn cell(&self, record: &Record) -> Cell {
        if let Some(render) = &self.render {
            return Cell {
                text: render(record),
                tooltip: None,
            };
        }

        let text = self
            .key
            .resolve(record)
            .map(ToString::to_string)
            .unwrap_or_default();
        if text.is_empty() {
            return Cell {
                text: EMPTY_CELL.to_string(),
                tooltip: None,
            };
        }
        match truncate_to_width(&text, MAX_CELL_WIDTH) {
            Some(truncated) => Cell {
                text: truncated,
                tooltip: Some(text),
            },
            None => Cell {
                text,
                tooltip: None,
            },
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// What a page renders into one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Display text, truncated when the underlying value is long.
    pub text: String,
    /// Full value, retained when `text` was truncated.
    pub tooltip: Option<String>,
}
