//! Table engine state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use girder_model::{Direction, FieldPath, Record, compare_values};
use log::{debug, trace};

use super::column::Column;
use super::view::TableView;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Internal state for the table engine.
#[derive(Debug)]
struct TableInner {
    /// Column definitions.
    columns: Vec<Column>,
    /// The full row set handed over by the page, in arrival order.
    rows: Vec<Record>,
    /// Paths searched by the free-text filter; empty means all column keys.
    search_keys: Vec<FieldPath>,
    /// Current free-text search.
    search_text: String,
    /// Active sort key and direction.
    sort: Option<(FieldPath, Direction)>,
    /// Rows per page.
    page_size: usize,
    /// Requested 1-based page; clamped into range at derivation time.
    current_page: usize,
}

impl TableInner {
    fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            search_keys: Vec::new(),
            search_text: String::new(),
            sort: None,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

/// The tabular data engine behind every list page.
///
/// `Table` owns the view-state of one list screen: search text, sort key
/// and direction, page size, and current page. [`view`](Table::view)
/// derives the visible page slice from scratch on every call; no operation
/// can fail on well-typed input, and out-of-range page requests clamp
/// silently.
///
/// Handles clone cheaply and share state, so a page can keep one clone for
/// its event handlers and another for rendering.
#[derive(Debug)]
pub struct Table {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    inner: Arc<RwLock<TableInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl Table {
    /// Create a new table with column definitions.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(columns))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<Column>, rows: Vec<Record>) -> Self {
        let mut inner = TableInner::new(columns);
        inner.rows = rows;
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(inner)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Restrict the free-text search to the given paths.
    ///
    /// Without this, every column key is searched.
    pub fn with_search_keys<I, S>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FieldPath>,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.search_keys = keys.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Set the initial sort.
    pub fn with_sort(self, key: &str, direction: Direction) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort = Some((FieldPath::parse(key), direction));
        }
        self
    }

    /// Set the initial page size. Must be positive.
    pub fn with_page_size(self, size: usize) -> Self {
        debug_assert!(size > 0, "page size must be positive");
        if let Ok(mut guard) = self.inner.write() {
            guard.page_size = size;
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Column access
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    /// Replace the column definitions.
    pub fn set_columns(&self, columns: Vec<Column>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.columns = columns;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Get the number of rows in the underlying set, before filtering.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the underlying row set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get all rows in arrival order.
    pub fn rows(&self) -> Vec<Record> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Replace the row set.
    ///
    /// Resets the page to 1; search text and sort state are preserved.
    pub fn set_rows(&self, rows: Vec<Record>) {
        if let Ok(mut guard) = self.inner.write() {
            trace!("{}: rows replaced ({})", self.id, rows.len());
            guard.rows = rows;
            guard.current_page = 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Get the current search text.
    pub fn search_text(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search_text.clone())
            .unwrap_or_default()
    }

    /// Get the searched paths; empty means all column keys.
    pub fn search_keys(&self) -> Vec<FieldPath> {
        self.inner
            .read()
            .map(|g| g.search_keys.clone())
            .unwrap_or_default()
    }

    /// Replace the search text and reset the page to 1.
    pub fn set_search_text(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            let text = text.into();
            if guard.search_text != text {
                guard.search_text = text;
                guard.current_page = 1;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the current sort state.
    pub fn sort(&self) -> Option<(FieldPath, Direction)> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Set sort by column key and direction.
    ///
    /// No-op for unknown keys and columns marked unsortable.
    pub fn set_sort(&self, key: &str, direction: Direction) {
        if let Ok(mut guard) = self.inner.write() {
            let key = FieldPath::parse(key);
            if guard.columns.iter().any(|c| c.key == key && c.sortable) {
                guard.sort = Some((key, direction));
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Toggle sort for a column.
    ///
    /// If the column is already the active sort key, flips the direction.
    /// If sorting a different column, sorts ascending. No-op (returns
    /// `None`) for unknown keys and columns marked unsortable. The page is
    /// not reset: re-ordering keeps the user where they are.
    /// Returns the new sort state.
    pub fn toggle_sort(&self, key: &str) -> Option<(FieldPath, Direction)> {
        if let Ok(mut guard) = self.inner.write() {
            let key = FieldPath::parse(key);
            if !guard.columns.iter().any(|c| c.key == key && c.sortable) {
                return None;
            }
            let new_sort = match guard.sort.take() {
                Some((active, direction)) if active == key => (key, direction.toggle()),
                _ => (key, Direction::Asc),
            };
            debug!("{}: sort {} {:?}", self.id, new_sort.0, new_sort.1);
            guard.sort = Some(new_sort.clone());
            self.dirty.store(true, Ordering::SeqCst);
            return Some(new_sort);
        }
        None
    }

    /// Clear sort state; filtered rows keep their arrival order.
    pub fn clear_sort(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort = None;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Get the page size.
    pub fn page_size(&self) -> usize {
        self.inner
            .read()
            .map(|g| g.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Replace the page size and reset the page to 1.
    ///
    /// A non-positive size is a caller contract violation; values come
    /// from the page-size menu the caller offers.
    pub fn set_page_size(&self, size: usize) {
        debug_assert!(size > 0, "page size must be positive");
        if let Ok(mut guard) = self.inner.write() {
            guard.page_size = size;
            guard.current_page = 1;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the requested page, before clamping.
    pub fn requested_page(&self) -> usize {
        self.inner.read().map(|g| g.current_page).unwrap_or(1)
    }

    /// Request a page. Out-of-range requests are clamped at derivation
    /// time, never rejected.
    pub fn set_page(&self, page: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.current_page = page.max(1);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Advance to the page after the currently visible one.
    pub fn next_page(&self) {
        let page = self.view().page_number();
        self.set_page(page + 1);
    }

    /// Return to the page before the currently visible one.
    pub fn prev_page(&self) {
        let page = self.view().page_number();
        self.set_page(page.saturating_sub(1).max(1));
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Derive the visible view: filter, stable sort, paginate.
    ///
    /// Recomputed in full on every call; cost is one linear scan plus a
    /// sort over the filtered rows.
    pub fn view(&self) -> TableView {
        self.inner
            .read()
            .map(|g| Self::derive_view(&g))
            .unwrap_or_default()
    }

    fn derive_view(g: &TableInner) -> TableView {
        let needle = g.search_text.to_lowercase();
        let mut rows: Vec<Record> = if needle.is_empty() {
            g.rows.clone()
        } else {
            let keys: Vec<&FieldPath> = if g.search_keys.is_empty() {
                g.columns.iter().map(|c| &c.key).collect()
            } else {
                g.search_keys.iter().collect()
            };
            g.rows
                .iter()
                .filter(|row| {
                    keys.iter().any(|key| {
                        key.resolve(row)
                            .map(|v| v.to_string().to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
                })
                .cloned()
                .collect()
        };

        if let Some((key, direction)) = &g.sort {
            // Vec::sort_by is stable, so equal keys keep arrival order.
            rows.sort_by(|a, b| direction.apply(compare_values(key.resolve(a), key.resolve(b))));
        }

        let total_count = rows.len();
        let page_size = g.page_size.max(1);
        let page_count = total_count.div_ceil(page_size).max(1);
        let page_number = g.current_page.clamp(1, page_count);
        if page_number != g.current_page {
            trace!("page {} clamped to {}", g.current_page, page_number);
        }

        let start = (page_number - 1) * page_size;
        let end = (start + page_size).min(total_count);
        rows.drain(..start);
        rows.truncate(end - start);
        TableView::new(rows, page_number, page_count, total_count)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
