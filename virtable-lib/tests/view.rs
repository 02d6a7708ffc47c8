use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use virtable_lib::model::{Person, Status};
use virtable_lib::query::{Direction, FilterValue, SortState};
use virtable_lib::virtualizer::{ScrollRequest, ViewportMetrics, VirtualizerOptions};
use virtable_lib::{FieldId, RowStore, TableView, ViewConfig, ViewError};

fn people(count: u64) -> Vec<Person> {
    (0..count)
        .map(|i| Person {
            id: 1000 + i,
            first_name: format!("First{i}"),
            last_name: format!("Last{i}"),
            age: (i % 40) as u32,
            visits: (i * 3 % 1000) as u32,
            status: Status::ALL[(i % 3) as usize],
            progress: (i % 101) as u8,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
        .collect()
}

fn view(count: u64) -> TableView<Person> {
    let config = ViewConfig::new()
        .debounce(Duration::from_millis(500))
        .virtualizer(VirtualizerOptions::new().estimate_size(10).overscan(5));
    TableView::new(RowStore::new(people(count)), Person::columns(), config)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ============================================================================
// Debounced input
// ============================================================================

#[test]
fn test_typing_burst_commits_once() {
    let mut v = view(100);
    let t0 = Instant::now();
    let field = FieldId::value("firstName");
    let version = v.version();

    for (i, text) in ["F", "Fi", "First1"].into_iter().enumerate() {
        assert_eq!(v.input(&field, text, t0 + ms(100 * i as u64)), Ok(false));
        assert!(!v.tick(t0 + ms(100 * i as u64)));
    }
    assert_eq!(v.next_deadline(), Some(t0 + ms(700)));
    assert!(!v.tick(t0 + ms(699)));
    assert!(v.tick(t0 + ms(700)));
    assert!(!v.tick(t0 + ms(2000)));

    assert_eq!(v.version(), version + 1);
    assert_eq!(v.filters().get("firstName"), Some(&FilterValue::text("First1")));
    // First1, First10..First19
    assert_eq!(v.len(), 11);
}

#[test]
fn test_two_fields_due_together_recompute_once() {
    let mut v = view(100);
    let t0 = Instant::now();
    let version = v.version();

    v.input(&FieldId::min("age"), "10", t0).unwrap();
    v.input(&FieldId::max("age"), "12", t0 + ms(50)).unwrap();
    assert!(v.tick(t0 + ms(600)));

    assert_eq!(v.version(), version + 1);
    assert_eq!(
        v.filters().get("age"),
        Some(&FilterValue::range(Some("10"), Some("12")))
    );
    assert_eq!(v.len(), 9);
}

#[test]
fn test_range_parts_merge_with_committed_bound() {
    let mut v = view(100);
    let t0 = Instant::now();
    v.input(&FieldId::min("age"), "30", t0).unwrap();
    v.tick(t0 + ms(500));
    v.input(&FieldId::max("age"), "31", t0 + ms(600)).unwrap();
    v.tick(t0 + ms(1100));
    assert_eq!(
        v.filters().get("age"),
        Some(&FilterValue::range(Some("30"), Some("31")))
    );

    v.input(&FieldId::min("age"), "", t0 + ms(1200)).unwrap();
    v.tick(t0 + ms(1700));
    assert_eq!(
        v.filters().get("age"),
        Some(&FilterValue::range(None, Some("31")))
    );
}

#[test]
fn test_select_commits_immediately() {
    let mut v = view(90);
    let t0 = Instant::now();
    assert_eq!(v.input(&FieldId::value("status"), "single", t0), Ok(true));
    assert_eq!(v.len(), 30);
    assert!(v.visible_rows().iter().all(|&i| v.store().rows()[i].status == Status::Single));

    assert_eq!(v.input(&FieldId::value("status"), "", t0), Ok(true));
    assert_eq!(v.len(), 90);
}

#[test]
fn test_recommitting_same_value_is_a_no_op() {
    let mut v = view(10);
    let t0 = Instant::now();
    v.input(&FieldId::value("status"), "single", t0).unwrap();
    let version = v.version();
    assert_eq!(v.input(&FieldId::value("status"), "single", t0), Ok(false));
    assert_eq!(v.version(), version);
}

#[test]
fn test_external_reset_wins_over_pending_edit() {
    let mut v = view(100);
    let t0 = Instant::now();
    let field = FieldId::value("firstName");

    v.input(&field, "First2", t0).unwrap();
    v.tick(t0 + ms(500));
    v.input(&field, "First25", t0 + ms(600)).unwrap();

    assert_eq!(v.set_filter("firstName", None), Ok(true));
    assert_eq!(v.input_value(&field), Some(""));
    assert_eq!(v.next_deadline(), None);
    assert!(!v.tick(t0 + ms(5000)));
    assert!(v.filters().is_empty());
    assert_eq!(v.len(), 100);
}

#[test]
fn test_external_change_leaves_other_fields_alone() {
    let mut v = view(100);
    let t0 = Instant::now();
    v.input(&FieldId::value("lastName"), "Last1", t0).unwrap();
    v.set_filter("age", Some(FilterValue::range(Some("5"), None::<&str>)))
        .unwrap();
    assert_eq!(v.input_value(&FieldId::min("age")), Some("5"));
    assert_eq!(v.next_deadline(), Some(t0 + ms(500)));
    assert!(v.tick(t0 + ms(500)));
    assert_eq!(v.filters().len(), 2);
}

#[test]
fn test_unmounted_input_never_commits() {
    let mut v = view(100);
    let t0 = Instant::now();
    let field = FieldId::value("firstName");
    v.input(&field, "First3", t0).unwrap();
    assert!(v.unmount_input(&field));
    assert!(!v.tick(t0 + ms(1000)));
    assert!(v.filters().is_empty());
    assert_eq!(
        v.input(&field, "x", t0),
        Err(ViewError::Unmounted(field.clone()))
    );

    v.mount_input(&field).unwrap();
    v.input(&field, "First3", t0 + ms(2000)).unwrap();
    assert!(v.tick(t0 + ms(2500)));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_wiring_mistakes_are_reported() {
    let mut v = view(10);
    let t0 = Instant::now();
    assert_eq!(
        v.input(&FieldId::value("height"), "1", t0),
        Err(ViewError::UnknownColumn("height".into()))
    );
    assert!(matches!(
        v.input(&FieldId::min("firstName"), "1", t0),
        Err(ViewError::KindMismatch { .. })
    ));
    assert!(matches!(
        v.input(&FieldId::value("status"), "married", t0),
        Err(ViewError::UnknownOption { .. })
    ));
    assert!(matches!(
        v.set_filter("age", Some(FilterValue::text("3"))),
        Err(ViewError::KindMismatch { .. })
    ));
    assert!(matches!(
        v.toggle_sort("height"),
        Err(ViewError::UnknownColumn(_))
    ));
    assert!(v.filters().is_empty());
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_toggle_sort_cycle() {
    let mut v = view(50);
    let sort = v.toggle_sort("age").unwrap().cloned();
    assert_eq!(sort, Some(SortState::desc("age")));
    assert_eq!(v.row(0).map(|p| p.age), Some(39));

    let sort = v.toggle_sort("age").unwrap().cloned();
    assert_eq!(sort.map(|s| s.direction), Some(Direction::Asc));
    assert_eq!(v.row(0).map(|p| p.age), Some(0));

    assert_eq!(v.toggle_sort("age").unwrap(), None);
    assert_eq!(v.visible_rows(), (0..50).collect::<Vec<_>>());
}

#[test]
fn test_string_column_sorts_ascending_first() {
    let mut v = view(50);
    let sort = v.toggle_sort("lastName").unwrap().cloned();
    assert_eq!(sort, Some(SortState::asc("lastName")));
    assert_eq!(v.row(0).map(|p| p.last_name.as_str()), Some("Last0"));

    let sort = v.toggle_sort("lastName").unwrap().cloned();
    assert_eq!(sort, Some(SortState::desc("lastName")));
    assert_eq!(v.row(0).map(|p| p.last_name.as_str()), Some("Last9"));

    // Switching columns starts the new column at its own first direction.
    let sort = v.toggle_sort("visits").unwrap().cloned();
    assert_eq!(sort, Some(SortState::desc("visits")));
}

// ============================================================================
// Scrolling and windowing
// ============================================================================

#[test]
fn test_refilter_clamps_scroll_instead_of_resetting() {
    let mut v = view(1000);
    v.set_viewport(ViewportMetrics::new(5000, 100));
    assert_eq!(v.scroll().offset, 5000);

    // 25 rows left: 250px of content, 150px of scroll range.
    v.set_filter("age", Some(FilterValue::range(Some("7"), Some("7"))))
        .unwrap();
    assert_eq!(v.len(), 25);
    assert_eq!(v.scroll().offset, 150);

    // Fits entirely: offset 0, but because the content got short, not as a reset.
    v.set_filter("status", Some(FilterValue::select("single")))
        .unwrap();
    assert_eq!(v.scroll().offset, 0);
}

#[test]
fn test_widening_filter_keeps_offset() {
    let mut v = view(1000);
    v.set_viewport(ViewportMetrics::new(300, 100));
    v.set_filter("status", Some(FilterValue::select("single")))
        .unwrap();
    v.clear_filters();
    assert_eq!(v.scroll().offset, 300);
}

#[test]
fn test_window_pairs_items_with_rows() {
    let mut v = view(1000);
    v.set_viewport(ViewportMetrics::new(500, 100));
    let w = v.window();
    assert_eq!(w.range, 45..65);
    assert_eq!(w.total_extent, 10_000);
    let rows: Vec<_> = v.rows_in(&w).map(|(_, p)| p.id).collect();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0], 1045);
}

#[test]
fn test_empty_result_gives_empty_window() {
    let mut v = view(100);
    v.set_viewport(ViewportMetrics::new(0, 100));
    v.set_filter("firstName", Some(FilterValue::text("nobody")))
        .unwrap();
    let w = v.window();
    assert!(w.is_empty());
    assert_eq!(w.total_extent, 0);
    assert_eq!(v.scroll().offset, 0);
}

#[test]
fn test_stale_measurement_after_refilter_is_dropped() {
    let mut v = view(100);
    v.set_viewport(ViewportMetrics::new(0, 50));
    let w = v.window();
    let stale = w.items[2].clone();

    v.set_filter("status", Some(FilterValue::select("relationship")))
        .unwrap();
    // Index 2 now holds a different person.
    assert!(!v.measured(stale.index, &stale.key, 80));
    assert_eq!(v.total_extent(), 10 * v.len() as u64);
    // No position of the old window still holds the row it was built for.
    assert_eq!(v.rows_in(&w).count(), 0);
}

#[test]
fn test_measurement_updates_layout() {
    let mut v = view(100);
    v.set_viewport(ViewportMetrics::new(0, 50));
    let w = v.window();
    for item in &w.items {
        v.measured(item.index, &item.key, 20);
    }
    let w = v.window();
    assert_eq!(w.visible, 0..3);
    assert_eq!(w.items[1].start, 20);
    // Ten rows rendered at 20, the other ninety still estimated.
    assert_eq!(w.total_extent, 10 * 20 + 90 * 10);
}

#[test]
fn test_measuring_rows_above_offset_keeps_top_row() {
    let mut v = view(1000);
    v.set_viewport(ViewportMetrics::new(500, 100));
    let w = v.window();
    assert_eq!(w.visible.start, 50);

    // The five overscan rows above grow by 10 each.
    for item in &w.items {
        v.measured(item.index, &item.key, 20);
    }
    assert_eq!(v.scroll().offset, 550);
    let w = v.window();
    assert_eq!(w.visible.start, 50);
    assert_eq!(w.items[5].start, v.scroll().offset);

    // Shrinking a row far above pulls the offset back by the same amount.
    let key = v.row(10).map(|p| p.id).unwrap();
    assert!(v.measured(10, &key, 4));
    assert_eq!(v.scroll().offset, 544);
    assert_eq!(v.window().visible.start, 50);

    // Rows below the offset leave it alone.
    let key = v.row(70).map(|p| p.id).unwrap();
    assert!(v.measured(70, &key, 30));
    assert_eq!(v.scroll().offset, 544);
}

#[test]
fn test_scroll_into_view() {
    let mut v = view(100);
    v.set_viewport(ViewportMetrics::new(0, 50));
    v.scroll_by(ScrollRequest::IntoView(40));
    assert_eq!(v.scroll().offset, 360);
    v.scroll_by(ScrollRequest::Home);
    assert_eq!(v.scroll().offset, 0);
}

#[test]
fn test_snapshot_shape() {
    let mut v = view(10);
    v.set_filter("age", Some(FilterValue::range(Some("1"), None::<&str>)))
        .unwrap();
    v.set_filter("status", Some(FilterValue::select("single")))
        .unwrap();
    v.set_sort(Some(SortState::desc("visits"))).unwrap();

    let json = serde_json::to_value(v.snapshot()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "columnFilters": [
                {"id": "age", "value": ["1", null]},
                {"id": "status", "value": "single"}
            ],
            "sorting": [{"id": "visits", "desc": true}]
        })
    );
}
