//! Girder - table and filter state for dashboard list pages.
//!
//! Every list screen in the dashboard is the same shape: rows arrive from a
//! REST endpoint, a table shows a searched, sorted, paginated view of them,
//! and a filter panel accumulates named multi-valued criteria shown as
//! removable pills. This crate owns the two reusable pieces of state behind
//! that shape:
//!
//! - [`table::Table`] - search text, sort key and direction, page size and
//!   current page, and the derivation of the visible page slice.
//! - [`filter::FilterPanel`] - the tabbed checklist that edits applied
//!   criteria and reports the new list back to the owning page.
//!
//! The two components share no state. The page is the integrator: it feeds
//! the filter panel's applied list back into its own data source (usually
//! [`filter::filter_records`] over the master row list, or a server
//! request) and hands the resulting rows to the table.

pub mod filter;
pub mod table;
pub mod utils;

pub use girder_model as model;

pub mod prelude {
    pub use crate::filter::{Criterion, FilterCategory, FilterPanel, FilterPanelId, filter_records};
    pub use crate::table::{
        Cell, Column, ColumnWidth, DEFAULT_PAGE_SIZE, Table, TableId, TableView,
    };
    pub use girder_model::{Direction, FieldPath, Record, Value, compare_values};
}
