//! Per-structure animation curves.
//!
//! Everything here is a pure function of scroll progress, elapsed time and the
//! structure index, so the render loop can recompute it every frame.

use crate::constants::*;

/// Progress value at which structure `index` starts rising.
#[inline]
pub fn rise_start(index: usize) -> f32 {
    (index as f32 * RISE_STAGGER) % RISE_STAGGER_WRAP
}

/// Progress window `(start, end)` over which structure `index` rises.
#[inline]
pub fn rise_window(index: usize) -> (f32, f32) {
    let start = rise_start(index);
    (start, start + 1.0 / RISE_RATE)
}

/// How far structure `index` has risen, in [0, 1].
#[inline]
pub fn current_rise(progress: f32, index: usize) -> f32 {
    let p = clamp_progress(progress);
    ((p - rise_start(index)) * RISE_RATE).clamp(0.0, 1.0)
}

/// Vertical center of a structure: fully sunken (`-height`) at rise 0, resting
/// (`height / 2`) at rise 1.
#[inline]
pub fn vertical_offset(height: f32, rise: f32) -> f32 {
    (height / 2.0) * rise - height * (1.0 - rise)
}

/// Glow pulse in [0, 1], phase-shifted by index so neighbours don't pulse together.
#[inline]
pub fn emissive_intensity(elapsed_sec: f32, index: usize) -> f32 {
    0.5 + (elapsed_sec + index as f32).sin() * 0.5
}

#[inline]
pub fn facade_opacity(rise: f32) -> f32 {
    FACADE_MAX_OPACITY * rise
}

#[inline]
pub fn spins(index: usize) -> bool {
    index % SPIN_EVERY == 0
}

/// NaN and out-of-range inputs collapse into [0, 1].
#[inline]
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// How per-tick increments relate to wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinMode {
    /// Fixed step per rendered frame; speed follows the display refresh rate.
    #[default]
    PerTick,
    /// Step scaled by `dt * REFERENCE_HZ`; same speed on any refresh rate.
    PerSecond,
}

impl SpinMode {
    #[inline]
    pub fn step(self, per_tick: f32, dt_sec: f32) -> f32 {
        match self {
            SpinMode::PerTick => per_tick,
            SpinMode::PerSecond => per_tick * dt_sec.max(0.0) * REFERENCE_HZ,
        }
    }
}
