//! Filter panel widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace};

use super::criterion::{Criterion, FilterCategory};

/// Unique identifier for a FilterPanel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterPanelId(usize);

impl FilterPanelId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FilterPanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__filter_panel_{}", self.0)
    }
}

/// Callback invoked with the full new applied list whenever it changes.
type ChangeHandler = Arc<dyn Fn(&[Criterion]) + Send + Sync>;

/// Internal state for the filter panel.
struct FilterPanelInner {
    /// Categories offered by the page, in tab order.
    categories: Vec<FilterCategory>,
    /// Applied criteria; at most one per category, never empty-valued.
    applied: Vec<Criterion>,
    /// Index of the active tab while open.
    active_category: usize,
    /// Pending selection for the active tab, in selection order.
    pending: Vec<String>,
    /// Applied-list change callback.
    on_change: Option<ChangeHandler>,
}

impl std::fmt::Debug for FilterPanelInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPanelInner")
            .field("categories", &self.categories)
            .field("applied", &self.applied)
            .field("active_category", &self.active_category)
            .field("pending", &self.pending)
            .field("on_change", &self.on_change.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The structured-filter pill store.
///
/// `FilterPanel` is either closed (its resting state) or open on one
/// category tab with a pending selection. Pending edits become real only
/// through [`apply`](FilterPanel::apply); dismissal discards them. The
/// applied list is owned by the page - the panel reports every change
/// through the [`on_change`](FilterPanel::on_change) callback, and can be
/// reseeded with [`set_applied`](FilterPanel::set_applied) so the UI
/// reopens with prior selections.
///
/// The panel holds no global listeners; the host's event boundary decides
/// what counts as an outside interaction and calls
/// [`dismiss`](FilterPanel::dismiss).
#[derive(Debug)]
pub struct FilterPanel {
    /// Unique identifier.
    id: FilterPanelId,
    /// Internal state.
    inner: Arc<RwLock<FilterPanelInner>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    /// Whether the panel is open.
    is_open: Arc<AtomicBool>,
}

impl FilterPanel {
    /// Create a panel for the given categories.
    pub fn new(categories: Vec<FilterCategory>) -> Self {
        Self {
            id: FilterPanelId::new(),
            inner: Arc::new(RwLock::new(FilterPanelInner {
                categories,
                applied: Vec::new(),
                active_category: 0,
                pending: Vec::new(),
                on_change: None,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
            is_open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Seed the applied list, e.g. when a page restores its prior state.
    ///
    /// Does not fire the change callback; the caller already owns this
    /// list. Empty-valued criteria are dropped and later duplicates of a
    /// category are ignored, keeping the applied-list invariants.
    pub fn with_applied(self, criteria: Vec<Criterion>) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.applied = normalize(criteria);
        }
        self
    }

    /// Set the applied-list change callback.
    pub fn on_change(self, handler: impl Fn(&[Criterion]) + Send + Sync + 'static) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_change = Some(Arc::new(handler));
        }
        self
    }

    /// Get the unique ID.
    pub fn id(&self) -> FilterPanelId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Get the categories, in tab order.
    pub fn categories(&self) -> Vec<FilterCategory> {
        self.inner
            .read()
            .map(|g| g.categories.clone())
            .unwrap_or_default()
    }

    /// Get the applied criteria.
    pub fn applied(&self) -> Vec<Criterion> {
        self.inner
            .read()
            .map(|g| g.applied.clone())
            .unwrap_or_default()
    }

    /// Get the removable pills: one `(category key, pill text)` per
    /// applied criterion.
    pub fn pills(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|g| {
                g.applied
                    .iter()
                    .map(|c| (c.kind.clone(), c.pill_text()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if the panel is open.
    pub fn is_open(&self) -> bool {
        self.is_open.load(Ordering::SeqCst)
    }

    /// Get the active category while open.
    pub fn active_category(&self) -> Option<FilterCategory> {
        if !self.is_open() {
            return None;
        }
        self.inner
            .read()
            .ok()
            .and_then(|g| g.categories.get(g.active_category).cloned())
    }

    /// Get the pending selection for the active category.
    pub fn pending(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.pending.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Open the panel on the first category.
    ///
    /// The pending selection is seeded from that category's applied
    /// criterion, so reopening shows what is currently in effect.
    pub fn open(&self) {
        if !self.is_open.swap(true, Ordering::SeqCst) {
            if let Ok(mut guard) = self.inner.write() {
                let pending = seeded_pending(&guard, 0);
                guard.active_category = 0;
                guard.pending = pending;
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Switch the active tab; the pending selection is reseeded from that
    /// category's applied criterion.
    ///
    /// No-op while closed, for unknown keys, and for the already-active
    /// tab (so a stray click does not discard pending edits).
    pub fn select_category(&self, key: &str) {
        if !self.is_open() {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            let Some(index) = guard.categories.iter().position(|c| c.key() == key) else {
                return;
            };
            if index != guard.active_category {
                let pending = seeded_pending(&guard, index);
                guard.active_category = index;
                guard.pending = pending;
                self.dirty.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Flip membership of `value` in the pending selection.
    ///
    /// Other categories' applied criteria are untouched; nothing is
    /// applied until [`apply`](FilterPanel::apply). No-op while closed.
    pub fn toggle_option(&self, value: &str) {
        if !self.is_open() {
            return;
        }
        if let Ok(mut guard) = self.inner.write() {
            if let Some(index) = guard.pending.iter().position(|v| v == value) {
                guard.pending.remove(index);
            } else {
                guard.pending.push(value.to_string());
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Commit the pending selection for the active category and close.
    ///
    /// Replaces that category's criterion in the applied list, or removes
    /// it when the pending selection is empty; other criteria are
    /// untouched. Fires the change callback when the list actually
    /// changed. Returns the new applied list.
    pub fn apply(&self) -> Vec<Criterion> {
        if !self.is_open.swap(false, Ordering::SeqCst) {
            return self.applied();
        }

        let mut result = Vec::new();
        let mut notify = None;
        if let Ok(mut guard) = self.inner.write() {
            let mut changed = false;
            if let Some(category) = guard.categories.get(guard.active_category).cloned() {
                let existing = guard.applied.iter().position(|c| c.kind == category.key());
                match existing {
                    Some(index) if guard.pending.is_empty() => {
                        guard.applied.remove(index);
                        changed = true;
                    }
                    Some(index) => {
                        if guard.applied[index].values != guard.pending {
                            let pending = guard.pending.clone();
                            guard.applied[index].values = pending;
                            changed = true;
                        }
                    }
                    None if guard.pending.is_empty() => {}
                    None => {
                        let criterion =
                            Criterion::new(category.key(), category.label(), guard.pending.clone());
                        guard.applied.push(criterion);
                        changed = true;
                    }
                }
            }
            result = guard.applied.clone();
            if changed {
                debug!("{}: applied filters ({})", self.id, result.len());
                notify = guard.on_change.clone();
            }
        }
        self.dirty.store(true, Ordering::SeqCst);

        if let Some(handler) = notify {
            handler(&result);
        }
        result
    }

    /// Remove the named criterion from the applied list, open or closed.
    ///
    /// The active tab and pending selection are not disturbed. Fires the
    /// change callback when a criterion was actually removed. Returns the
    /// new applied list.
    pub fn remove_criterion(&self, kind: &str) -> Vec<Criterion> {
        let mut result = Vec::new();
        let mut notify = None;
        if let Ok(mut guard) = self.inner.write() {
            if let Some(index) = guard.applied.iter().position(|c| c.kind == kind) {
                guard.applied.remove(index);
                debug!("{}: removed criterion '{}'", self.id, kind);
                notify = guard.on_change.clone();
                self.dirty.store(true, Ordering::SeqCst);
            }
            result = guard.applied.clone();
        }

        if let Some(handler) = notify {
            handler(&result);
        }
        result
    }

    /// Close without applying pending edits.
    ///
    /// The host calls this when an interaction lands outside the panel's
    /// bounds.
    pub fn dismiss(&self) {
        if self.is_open.swap(false, Ordering::SeqCst) {
            trace!("{}: dismissed without applying", self.id);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Replace the applied list, e.g. when the page's state changed
    /// elsewhere. Same normalization as
    /// [`with_applied`](FilterPanel::with_applied); does not fire the
    /// change callback.
    pub fn set_applied(&self, criteria: Vec<Criterion>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.applied = normalize(criteria);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the panel state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for FilterPanel {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            is_open: Arc::clone(&self.is_open),
        }
    }
}

/// Pending selection for a category: its applied values, else empty.
fn seeded_pending(inner: &FilterPanelInner, index: usize) -> Vec<String> {
    inner
        .categories
        .get(index)
        .and_then(|category| inner.applied.iter().find(|c| c.kind == category.key()))
        .map(|criterion| criterion.values.clone())
        .unwrap_or_default()
}

/// Drops empty-valued criteria and later duplicates of a category.
fn normalize(criteria: Vec<Criterion>) -> Vec<Criterion> {
    let mut normalized: Vec<Criterion> = Vec::with_capacity(criteria.len());
    for criterion in criteria {
        if criterion.values.is_empty() {
            continue;
        }
        if normalized.iter().any(|c| c.kind == criterion.kind) {
            continue;
        }
        normalized.push(criterion);
    }
    normalized
}
