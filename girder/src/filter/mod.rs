//! Structured filters - the pill store behind every list page's filter bar.
//!
//! A page declares its filter categories (Industry, Status, Owner, ...)
//! with their available options. [`FilterPanel`] owns the editing state: a
//! tabbed checklist where the user picks options for one category at a
//! time, applies or dismisses, and removes whole criteria as pills. The
//! applied list itself belongs to the page, which re-derives its row set
//! whenever it changes - typically with [`filter_records`] over the master
//! list, or by issuing a new server request.
//!
//! The panel feeds nothing into the table engine directly; the table only
//! does free-text search. Keeping the stages separate is deliberate - see
//! the crate docs.

mod criterion;
mod state;

pub use criterion::{Criterion, FilterCategory, filter_records};
pub use state::{FilterPanel, FilterPanelId};
