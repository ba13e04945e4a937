// Rise animator and emission pulse properties.

use city_core::*;

#[test]
fn rise_start_staggers_and_wraps_within_first_half() {
    assert_eq!(rise_start(0), 0.0);
    assert!((rise_start(10) - 0.1).abs() < 1e-6);
    assert!((rise_start(49) - 0.49).abs() < 1e-5);
    // index 50 wraps back to the start of the cycle
    assert!(rise_start(50) < 1e-5 || (rise_start(50) - 0.5).abs() < 1e-5);
    assert!((rise_start(55) - 0.05).abs() < 1e-5);
    for i in 0..200 {
        let s = rise_start(i);
        assert!((0.0..0.5 + 1e-6).contains(&s), "index {i} start {s}");
    }
}

#[test]
fn current_rise_stays_in_unit_interval_and_is_monotonic() {
    for index in 0..STRUCTURE_COUNT {
        let mut prev = -1.0f32;
        for step in 0..=400 {
            let p = step as f32 / 400.0;
            let r = current_rise(p, index);
            assert!((0.0..=1.0).contains(&r), "rise {r} out of range at p={p}");
            assert!(r >= prev, "rise decreased for index {index} at p={p}");
            prev = r;
        }
    }
}

#[test]
fn current_rise_clamps_out_of_range_progress() {
    assert_eq!(current_rise(-0.5, 0), 0.0);
    assert_eq!(current_rise(1.7, 0), 1.0);
    assert_eq!(current_rise(f32::NAN, 3), 0.0);
}

#[test]
fn vertical_offset_endpoints() {
    for &h in &[4.0f32, 7.5, 16.0] {
        assert!((vertical_offset(h, current_rise(0.0, 5)) + h).abs() < 1e-6);
        assert!((vertical_offset(h, 1.0) - h / 2.0).abs() < 1e-6);
    }
    // every structure is fully risen by the end of its window
    for index in 0..STRUCTURE_COUNT {
        let (_, end) = rise_window(index);
        let r = current_rise(end.min(1.0) + 1e-4, index);
        assert!((r - 1.0).abs() < 1e-3, "index {index} rise {r} at window end");
        assert!((vertical_offset(10.0, current_rise(1.0, index)) - 5.0).abs() < 1e-5);
    }
}

#[test]
fn end_to_end_first_structure_at_twenty_percent() {
    let index = 0;
    let height = 10.0;
    let progress = 0.2;
    assert_eq!(rise_start(index), 0.0);
    let rise = current_rise(progress, index);
    assert!((rise - 0.6).abs() < 1e-5);
    let y = vertical_offset(height, rise);
    assert!((y - (-1.0)).abs() < 1e-4, "offset was {y}");
}

#[test]
fn emissive_intensity_stays_in_unit_interval() {
    for index in 0..STRUCTURE_COUNT {
        for step in 0..500 {
            let t = step as f32 * 0.137;
            let e = emissive_intensity(t, index);
            assert!((0.0..=1.0).contains(&e), "intensity {e} at t={t} index={index}");
        }
    }
}

#[test]
fn emissive_phase_differs_between_neighbours() {
    let a = emissive_intensity(1.0, 0);
    let b = emissive_intensity(1.0, 1);
    assert!((a - b).abs() > 1e-3);
}

#[test]
fn every_third_structure_spins() {
    let spinning: Vec<usize> = (0..10).filter(|&i| spins(i)).collect();
    assert_eq!(spinning, vec![0, 3, 6, 9]);
}

#[test]
fn facade_opacity_follows_rise() {
    assert_eq!(facade_opacity(0.0), 0.0);
    assert!((facade_opacity(1.0) - FACADE_MAX_OPACITY).abs() < 1e-6);
}

#[test]
fn spin_mode_steps() {
    assert_eq!(SpinMode::PerTick.step(0.005, 0.5), 0.005);
    let per_sec = SpinMode::PerSecond.step(0.005, 1.0 / 60.0);
    assert!((per_sec - 0.005).abs() < 1e-6);
    let slow_display = SpinMode::PerSecond.step(0.005, 1.0 / 30.0);
    assert!((slow_display - 0.01).abs() < 1e-6);
    assert_eq!(SpinMode::PerSecond.step(0.005, -1.0), 0.0);
}
