// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        CHAT_TOGGLE_ID,
        CHAT_PANEL_ID,
        CHAT_CLOSE_ID,
        CHAT_LOG_ID,
        CHAT_INPUT_ID,
        CHAT_SEND_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "id {a} must be a single token");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn row_classes_share_a_base_class() {
    for class in [USER_ROW_CLASS, MODEL_ROW_CLASS, LOADING_ROW_CLASS] {
        assert!(class.split(' ').any(|c| c == "msg"), "{class}");
    }
    assert_ne!(USER_ROW_CLASS, MODEL_ROW_CLASS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_parameters_are_within_reasonable_bounds() {
    assert!(BLOOM_STRENGTH > 0.0);
    assert!(BLOOM_THRESHOLD >= 0.0 && BLOOM_THRESHOLD < 1.0);
    assert!(BLOOM_RADIUS > 0.0 && BLOOM_RADIUS <= 1.0);
    assert!(INITIAL_INSTANCE_CAPACITY.is_power_of_two());
}

#[test]
fn clear_color_is_a_dark_blue() {
    let [r, g, b] = CLEAR_RGB;
    assert!(b > r && b > g);
    assert!(r.max(g).max(b) < 0.05);
}
