use virtable_lib::virtualizer::{ViewportMetrics, Virtualizer, VirtualizerOptions};

fn uniform(count: u32, estimate: u32, overscan: usize) -> Virtualizer<u32> {
    let mut v = Virtualizer::new(
        VirtualizerOptions::new()
            .estimate_size(estimate)
            .overscan(overscan),
    );
    v.set_keys((0..count).collect());
    v
}

// ============================================================================
// Windowing
// ============================================================================

#[test]
fn test_thousand_uniform_rows() {
    let mut v = uniform(1000, 10, 5);
    let w = v.compute_window(500, 100);
    assert_eq!(w.visible, 50..60);
    assert_eq!(w.range, 45..65);
    assert_eq!(w.items.first().map(|i| i.index), Some(45));
    assert_eq!(w.items.last().map(|i| i.index), Some(64));
    assert_eq!(w.items[5].start, 500);
    assert_eq!(w.total_extent, 10_000);
}

#[test]
fn test_window_covers_every_intersecting_row() {
    let mut v = uniform(300, 10, 0);
    // A mix of measured heights, including zero.
    for i in 0..300u32 {
        let size = match i % 7 {
            0 => 3,
            1 => 25,
            2 => 0,
            _ => 10,
        };
        v.measure(i as usize, &i, size);
    }
    let total = v.total_extent();

    for offset in (0..total + 40).step_by(7) {
        for viewport in [1, 9, 10, 33, 120] {
            let w = v.compute_window(offset, viewport);
            let view_end = offset + viewport;
            for index in 0..300usize {
                let start = v.offset_of(index);
                let end = start + u64::from(v.item_size(index));
                if start < view_end && end > offset {
                    assert!(
                        w.visible.contains(&index),
                        "row {index} [{start}, {end}) missing at offset {offset} viewport {viewport}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_items_are_contiguous() {
    let mut v = uniform(50, 10, 3);
    v.measure(20, &20, 44);
    let w = v.compute_window(150, 80);
    for pair in w.items.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start);
        assert_eq!(pair[0].index + 1, pair[1].index);
    }
}

#[test]
fn test_negative_metrics_saturate() {
    let metrics = ViewportMetrics::from_signed(-30, -100);
    assert_eq!(metrics, ViewportMetrics::new(0, 0));

    let mut v = uniform(10, 10, 5);
    let w = v.compute_window(metrics.scroll_offset, metrics.viewport_height);
    assert!(w.is_empty());
}

// ============================================================================
// Measurement
// ============================================================================

#[test]
fn test_measurement_shifts_following_rows() {
    let mut v = uniform(100, 10, 0);
    assert!(v.measure(10, &10, 30));
    assert_eq!(v.offset_of(10), 100);
    assert_eq!(v.offset_of(11), 130);
    assert_eq!(v.total_extent(), 1020);
    let w = v.compute_window(100, 30);
    assert_eq!(w.visible, 10..11);
}

#[test]
fn test_measurement_for_replaced_row_is_dropped() {
    let mut v = uniform(10, 10, 0);
    // Row 3 gets filtered out; key 9 now sits at index 3.
    v.set_keys(vec![0, 1, 2, 9]);
    assert!(!v.measure(3, &3, 50));
    assert_eq!(v.item_size(3), 10);
    assert_eq!(v.total_extent(), 40);
}

#[test]
fn test_heights_move_with_their_rows() {
    let mut v = uniform(5, 10, 0);
    v.measure(4, &4, 70);
    assert_eq!(v.total_extent(), 110);

    // Reverse the sequence: the tall row is now first.
    v.set_keys(vec![4, 3, 2, 1, 0]);
    assert_eq!(v.item_size(0), 70);
    assert_eq!(v.offset_of(1), 70);
    assert_eq!(v.total_extent(), 110);

    // A different row landing on the old position keeps the estimate.
    assert_eq!(v.item_size(4), 10);
}

#[test]
fn test_clear_measurements() {
    let mut v = uniform(5, 10, 0);
    v.measure(0, &0, 40);
    assert_eq!(v.measured_count(), 1);
    v.clear_measurements();
    assert_eq!(v.measured_count(), 0);
    assert_eq!(v.total_extent(), 50);
}

#[test]
fn test_cache_prunes_once_past_threshold() {
    let mut v = uniform(300, 10, 0);
    for i in 0..300u32 {
        v.measure(i as usize, &i, 20);
    }
    assert_eq!(v.measured_count(), 300);

    // 300 entries against max(2 * 100, 256): dead keys go.
    v.set_keys((0..100).collect());
    assert_eq!(v.measured_count(), 100);

    v.set_keys((0..300).collect());
    assert_eq!(v.item_size(99), 20);
    assert_eq!(v.item_size(250), 10);
}

#[test]
fn test_cache_keeps_entries_under_threshold() {
    let mut v = uniform(200, 10, 0);
    for i in 0..200u32 {
        v.measure(i as usize, &i, 20);
    }

    // 200 entries never exceed the 256 floor.
    v.set_keys((0..50).collect());
    assert_eq!(v.measured_count(), 200);

    // A row filtered out and back in keeps its height.
    v.set_keys(vec![150, 0]);
    assert_eq!(v.item_size(0), 20);
    assert_eq!(v.offset_of(1), 20);
}

#[test]
fn test_huge_overscan_clamps_to_sequence() {
    let mut v = uniform(100, 10, usize::MAX);
    let w = v.compute_window(500, 100);
    assert_eq!(w.visible, 50..60);
    assert_eq!(w.range, 0..100);
}
