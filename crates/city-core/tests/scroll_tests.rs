// Scroll state normalization and the shared scroll cell.

use city_core::*;

#[test]
fn progress_is_offset_over_scrollable_distance() {
    let s = ScrollState::from_metrics(500.0, 3000.0, 1000.0);
    assert_eq!(s.max_scroll_px, 2000.0);
    assert!((s.progress() - 0.25).abs() < 1e-6);
}

#[test]
fn progress_clamps_overscroll() {
    assert_eq!(ScrollState::from_metrics(-40.0, 3000.0, 1000.0).progress(), 0.0);
    assert_eq!(ScrollState::from_metrics(2600.0, 3000.0, 1000.0).progress(), 1.0);
}

#[test]
fn non_scrollable_page_stays_at_zero() {
    assert_eq!(ScrollState::from_metrics(0.0, 800.0, 800.0).progress(), 0.0);
    assert_eq!(ScrollState::from_metrics(10.0, 600.0, 800.0).progress(), 0.0);
    assert_eq!(ScrollState::default().progress(), 0.0);
}

#[test]
fn non_finite_offset_stays_at_zero() {
    let s = ScrollState {
        offset_px: f64::NAN,
        max_scroll_px: 100.0,
    };
    assert_eq!(s.progress(), 0.0);
}

#[test]
fn cell_clones_share_state() {
    let writer = ScrollCell::new();
    let reader = writer.clone();
    writer.set_extent(5000.0, 1000.0);
    writer.set_offset(2000.0);
    assert!((reader.progress() - 0.5).abs() < 1e-6);
    assert_eq!(reader.snapshot().offset_px, 2000.0);
}

#[test]
fn scroll_by_stays_within_range() {
    let cell = ScrollCell::new();
    cell.set_extent(2000.0, 1000.0);
    cell.scroll_by(-50.0);
    assert_eq!(cell.snapshot().offset_px, 0.0);
    cell.scroll_by(400.0);
    assert!((cell.progress() - 0.4).abs() < 1e-6);
    cell.scroll_by(10_000.0);
    assert_eq!(cell.snapshot().offset_px, 1000.0);
    assert_eq!(cell.progress(), 1.0);
}

#[test]
fn shrinking_extent_pulls_offset_back() {
    let cell = ScrollCell::new();
    cell.set_extent(4000.0, 1000.0);
    cell.set_offset(2500.0);
    cell.set_extent(2000.0, 1000.0);
    assert_eq!(cell.snapshot().offset_px, 1000.0);
    assert_eq!(cell.progress(), 1.0);
}
