//! The table view: input → filter state → row sequence → render window.
//!
//! [`TableView`] owns every piece of mutable state for one table and
//! sequences the updates between them:
//!
//! 1. Raw edits go to a per-field [`Debounced`] input. Select fields skip the
//!    debouncer and commit at once.
//! 2. [`TableView::tick`] collects every edit that became due, folds them
//!    into a single new [`FilterState`] and re-derives the row sequence once.
//! 3. The new sequence's row keys go to the [`Virtualizer`], and the scroll
//!    offset is clamped into the new content height.
//! 4. The renderer asks for a [`Window`], draws it, and reports row heights
//!    back through [`TableView::measured`].
//!
//! Nothing here owns a timer. Callers pass in the current [`Instant`] and
//! sleep until [`TableView::next_deadline`].

mod config;
mod field;
mod snapshot;

use std::collections::BTreeMap;
use std::time::Instant;

use log::debug;

use crate::column::{Column, FilterKind};
use crate::debounce::Debounced;
use crate::error::ViewError;
use crate::model::TableRow;
use crate::query::{Engine, FilterState, FilterValue, SortState};
use crate::store::RowStore;
use crate::virtualizer::{
    ScrollRequest, ScrollState, ViewportMetrics, VirtualItem, Virtualizer, Window,
};

pub use config::ViewConfig;
pub use field::{FieldId, FieldPart};
pub use snapshot::{ColumnFilter, ColumnSort, Snapshot};

/// A filtered, sorted and virtualized table.
#[derive(Debug)]
pub struct TableView<T: TableRow> {
    store: RowStore<T>,
    engine: Engine<T>,
    config: ViewConfig,
    filters: FilterState,
    sort: Option<SortState>,
    /// Store indices of the visible row sequence.
    rows: Vec<usize>,
    virtualizer: Virtualizer<T::Key>,
    scroll: ScrollState,
    inputs: BTreeMap<FieldId, Debounced<String>>,
    /// Bumped on every re-derivation.
    version: u64,
}

impl<T: TableRow> TableView<T> {
    /// Create a view over `store` with one mounted input per debounced field.
    pub fn new(store: RowStore<T>, columns: Vec<Column<T>>, config: ViewConfig) -> Self {
        let mut inputs = BTreeMap::new();
        for column in &columns {
            if !column.filter_kind().is_debounced() {
                continue;
            }
            for &part in FieldPart::for_kind(column.filter_kind()) {
                inputs.insert(
                    FieldId::new(column.key(), part),
                    Debounced::new(String::new(), config.debounce),
                );
            }
        }

        let mut view = Self {
            store,
            engine: Engine::new(columns),
            virtualizer: Virtualizer::new(config.virtualizer.clone()),
            config,
            filters: FilterState::new(),
            sort: None,
            rows: Vec::new(),
            scroll: ScrollState::new(),
            inputs,
            version: 0,
        };
        view.recompute();
        view
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &RowStore<T> {
        &self.store
    }

    pub fn columns(&self) -> &[Column<T>] {
        self.engine.columns()
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.engine.column(key)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The committed filter state.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The committed sort.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Store indices of the visible rows, in display order.
    pub fn visible_rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of rows in the visible sequence.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at a position of the visible sequence.
    pub fn row(&self, index: usize) -> Option<&T> {
        self.rows.get(index).and_then(|&i| self.store.get(i))
    }

    /// Derivation counter; changes whenever the row sequence is rebuilt.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn total_extent(&mut self) -> u64 {
        self.virtualizer.total_extent()
    }

    /// What a mounted field's control currently shows.
    pub fn input_value(&self, field: &FieldId) -> Option<&str> {
        self.inputs.get(field).map(|input| input.value().as_str())
    }

    pub fn is_mounted(&self, field: &FieldId) -> bool {
        self.inputs.contains_key(field)
    }

    /// Earliest instant at which [`TableView::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inputs.values().filter_map(Debounced::deadline).min()
    }

    /// Diagnostic snapshot of the committed state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(&self.filters, self.sort.as_ref())
    }

    // -------------------------------------------------------------------------
    // User input
    // -------------------------------------------------------------------------

    /// Feed a raw edit from a filter control.
    ///
    /// Text and range edits are buffered until [`TableView::tick`] finds them
    /// due. Select edits commit immediately. Returns whether the row sequence
    /// was re-derived.
    pub fn input(
        &mut self,
        field: &FieldId,
        raw: impl Into<String>,
        now: Instant,
    ) -> Result<bool, ViewError> {
        let raw = raw.into();
        let kind = self.field_kind(field)?;

        if kind == FilterKind::Select {
            self.check_option(&field.column, &raw)?;
            debug!("Select '{field}' = '{raw}'");
            return Ok(self.commit(vec![(field.clone(), raw)]));
        }

        let input = self
            .inputs
            .get_mut(field)
            .ok_or_else(|| ViewError::Unmounted(field.clone()))?;
        input.input(raw, now);
        Ok(false)
    }

    /// Commit every debounced edit that is due at `now`.
    ///
    /// All due edits land in one filter state, so the row sequence is
    /// re-derived at most once. Returns whether it was.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due: Vec<(FieldId, String)> = self
            .inputs
            .iter_mut()
            .filter_map(|(field, input)| input.poll(now).map(|value| (field.clone(), value)))
            .collect();
        if due.is_empty() {
            return false;
        }
        debug!("Committing {} debounced edit(s)", due.len());
        self.commit(due)
    }

    /// Tear down a field's control. Pending edits are dropped.
    pub fn unmount_input(&mut self, field: &FieldId) -> bool {
        match self.inputs.remove(field) {
            Some(mut input) => {
                input.teardown();
                debug!("Unmounted input '{field}'");
                true
            }
            None => false,
        }
    }

    /// Mount a fresh control for a debounced field, showing the committed
    /// value.
    pub fn mount_input(&mut self, field: &FieldId) -> Result<(), ViewError> {
        let kind = self.field_kind(field)?;
        if !kind.is_debounced() {
            return Err(ViewError::KindMismatch {
                column: field.column.clone(),
                kind,
            });
        }
        let value = field_value(&self.filters, field);
        self.inputs
            .insert(field.clone(), Debounced::new(value, self.config.debounce));
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Programmatic state changes
    // -------------------------------------------------------------------------

    /// Set or clear a column's filter from outside the input controls.
    ///
    /// Controls of the column whose value changes drop any pending edit and
    /// show the new value.
    pub fn set_filter(
        &mut self,
        column: &str,
        value: Option<FilterValue>,
    ) -> Result<bool, ViewError> {
        let kind = self.filter_kind(column)?;
        if let Some(value) = &value {
            let fits = matches!(
                (kind, value),
                (FilterKind::Text, FilterValue::Text(_))
                    | (FilterKind::Range, FilterValue::Range(..))
                    | (FilterKind::Select, FilterValue::Select(_))
            );
            if !fits {
                return Err(ViewError::KindMismatch {
                    column: column.to_string(),
                    kind,
                });
            }
            if let FilterValue::Select(option) = value {
                self.check_option(column, option)?;
            }
        }

        let filters = match value {
            Some(value) => self.filters.with(column, value),
            None => self.filters.without(column),
        };
        Ok(self.replace_external(filters))
    }

    /// Clear every filter.
    pub fn clear_filters(&mut self) -> bool {
        self.replace_external(FilterState::new())
    }

    /// Replace the sort.
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<(), ViewError> {
        if let Some(sort) = &sort {
            self.check_sortable(&sort.column)?;
        }
        if self.sort != sort {
            self.sort = sort;
            self.recompute();
        }
        Ok(())
    }

    /// Header click: the column's first direction, then the other one, then
    /// unsorted.
    pub fn toggle_sort(&mut self, column: &str) -> Result<Option<&SortState>, ViewError> {
        let first = self.check_sortable(column)?.first_direction();
        self.sort = SortState::toggled(self.sort.as_ref(), column, first);
        debug!("Sort is now {:?}", self.sort);
        self.recompute();
        Ok(self.sort.as_ref())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Record the renderer's scroll offset and viewport height.
    ///
    /// The offset is clamped into the scrollable range.
    pub fn set_viewport(&mut self, metrics: ViewportMetrics) {
        self.sync_content_height();
        self.scroll.set_viewport(metrics.viewport_height);
        self.scroll.scroll_to(metrics.scroll_offset);
    }

    /// Apply a scroll request.
    pub fn scroll_by(&mut self, request: ScrollRequest) {
        self.sync_content_height();
        if let Some(ScrollRequest::IntoView(index)) = self.scroll.apply_request(request)
            && index < self.rows.len()
        {
            let start = self.virtualizer.offset_of(index);
            let end = start + u64::from(self.virtualizer.item_size(index));
            self.scroll.reveal(start, end);
        }
    }

    /// Rows to render at the current scroll position.
    pub fn window(&mut self) -> Window<T::Key> {
        self.sync_content_height();
        self.virtualizer
            .compute_window(self.scroll.offset, self.scroll.viewport)
    }

    /// Pair window items with their rows.
    ///
    /// Items whose position now holds a different row (the window predates a
    /// re-derivation) are skipped.
    pub fn rows_in<'a>(
        &'a self,
        window: &'a Window<T::Key>,
    ) -> impl Iterator<Item = (&'a VirtualItem<T::Key>, &'a T)> + 'a {
        window.items.iter().filter_map(move |item| {
            self.row(item.index)
                .filter(|row| row.key() == item.key)
                .map(|row| (item, row))
        })
    }

    /// Report a rendered row's height. Stale reports are ignored.
    ///
    /// A row that starts above the scroll offset shifts everything below it,
    /// so the offset moves by the same amount and the rows on screen stay put.
    pub fn measured(&mut self, index: usize, key: &T::Key, height: u32) -> bool {
        let start = self.virtualizer.offset_of(index);
        let before = self.virtualizer.item_size(index);
        if !self.virtualizer.measure(index, key, height) {
            return false;
        }
        self.sync_content_height();
        if start < self.scroll.offset {
            let delta = i64::from(height) - i64::from(before);
            self.scroll
                .scroll_to(self.scroll.offset.saturating_add_signed(delta));
        }
        true
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn filter_kind(&self, column: &str) -> Result<FilterKind, ViewError> {
        let kind = self
            .engine
            .column(column)
            .ok_or_else(|| ViewError::UnknownColumn(column.to_string()))?
            .filter_kind();
        if !kind.is_filterable() {
            return Err(ViewError::NotFilterable(column.to_string()));
        }
        Ok(kind)
    }

    fn field_kind(&self, field: &FieldId) -> Result<FilterKind, ViewError> {
        let kind = self.filter_kind(&field.column)?;
        if !field.part.fits(kind) {
            return Err(ViewError::KindMismatch {
                column: field.column.clone(),
                kind,
            });
        }
        Ok(kind)
    }

    fn check_option(&self, column: &str, value: &str) -> Result<(), ViewError> {
        let options = self
            .engine
            .column(column)
            .map(Column::select_options)
            .unwrap_or_default();
        if value.is_empty() || options.is_empty() || options.iter().any(|o| o == value) {
            Ok(())
        } else {
            Err(ViewError::UnknownOption {
                column: column.to_string(),
                value: value.to_string(),
            })
        }
    }

    fn check_sortable(&self, column: &str) -> Result<&Column<T>, ViewError> {
        let column_def = self
            .engine
            .column(column)
            .ok_or_else(|| ViewError::UnknownColumn(column.to_string()))?;
        if !column_def.is_sortable() {
            return Err(ViewError::NotSortable(column.to_string()));
        }
        Ok(column_def)
    }

    /// Fold field edits into one new filter state and commit it.
    fn commit(&mut self, edits: Vec<(FieldId, String)>) -> bool {
        let mut filters = self.filters.clone();
        for (field, raw) in edits {
            let current = filters.get(&field.column);
            let value = match field.part {
                FieldPart::Min => FilterValue::Range(
                    non_empty(raw),
                    current.and_then(FilterValue::max).map(str::to_string),
                ),
                FieldPart::Max => FilterValue::Range(
                    current.and_then(FilterValue::min).map(str::to_string),
                    non_empty(raw),
                ),
                FieldPart::Value => match self.engine.column(&field.column).map(Column::filter_kind)
                {
                    Some(FilterKind::Select) => FilterValue::Select(raw),
                    _ => FilterValue::Text(raw),
                },
            };
            filters = filters.with(field.column, value);
        }
        self.replace_filters(filters)
    }

    /// Commit a state set from outside, resyncing controls whose value moved.
    fn replace_external(&mut self, filters: FilterState) -> bool {
        for (field, input) in self.inputs.iter_mut() {
            let before = field_value(&self.filters, field);
            let after = field_value(&filters, field);
            if before != after {
                input.sync(after);
            }
        }
        self.replace_filters(filters)
    }

    fn replace_filters(&mut self, filters: FilterState) -> bool {
        if filters.same_as(&self.filters) {
            return false;
        }
        self.filters = filters;
        self.recompute();
        true
    }

    /// Re-derive the row sequence and hand it to the virtualizer.
    fn recompute(&mut self) {
        let rows = self
            .engine
            .derive(&self.store, &self.filters, self.sort.as_ref());
        let keys = rows
            .iter()
            .filter_map(|&i| self.store.get(i).map(TableRow::key))
            .collect();
        self.rows = rows;
        self.virtualizer.set_keys(keys);

        let offset_before = self.scroll.offset;
        self.sync_content_height();
        self.version += 1;
        debug!(
            "Derived {} of {} rows (version {}, {} filter(s), sort {:?}), scroll {} -> {}",
            self.rows.len(),
            self.store.len(),
            self.version,
            self.filters.len(),
            self.sort,
            offset_before,
            self.scroll.offset
        );
    }

    fn sync_content_height(&mut self) {
        let total = self.virtualizer.total_extent();
        self.scroll.set_content_height(total);
    }
}

/// The value a field's control shows for a committed state.
fn field_value(filters: &FilterState, field: &FieldId) -> String {
    let value = filters.get(&field.column);
    let shown = match field.part {
        FieldPart::Value => value.and_then(FilterValue::as_str),
        FieldPart::Min => value.and_then(FilterValue::min),
        FieldPart::Max => value.and_then(FilterValue::max),
    };
    shown.unwrap_or_default().to_string()
}

fn non_empty(raw: String) -> Option<String> {
    (!raw.is_empty()).then_some(raw)
}
