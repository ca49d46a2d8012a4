//! Table engine - a searched, sorted, paginated view over in-memory rows.
//!
//! The table owns its view-state (search text, sort key and direction,
//! page size, current page) and derives the visible page on demand:
//!
//! - filter: case-insensitive substring match of the search text against
//!   the caller's search keys (all column keys when unspecified)
//! - sort: stable sort by the active column key through the heterogeneous
//!   comparator, direction applied by reversing the ordering
//! - paginate: slice the current page, with the page number clamped into
//!   `[1, page_count]`
//!
//! The derivation is recomputed on every [`Table::view`] call rather than
//! incrementally maintained, so no qualifying state change can leave a
//! stale view behind.
//!
//! # Example
//!
//! ```
//! use girder::table::{Column, Table};
//! use girder_model::Record;
//!
//! let table = Table::with_rows(
//!     vec![
//!         Column::new("name", "Name"),
//!         Column::new("salesman.name", "Salesman"),
//!     ],
//!     vec![
//!         Record::new().set("name", "Acme"),
//!         Record::new().set("name", "Contoso"),
//!     ],
//! );
//!
//! table.set_search_text("con");
//! assert_eq!(table.view().total_count(), 1);
//! ```

mod column;
mod state;
mod view;

pub use column::{Cell, CellRenderer, Column, ColumnWidth, EMPTY_CELL, MAX_CELL_WIDTH};
pub use state::{DEFAULT_PAGE_SIZE, Table, TableId};
pub use view::TableView;
