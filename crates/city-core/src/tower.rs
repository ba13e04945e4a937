//! Central sky tower: spire, three spinning rings and a beacon.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug)]
pub struct RingSpec {
    pub height_frac: f32,
    pub radius: f32,
    pub thickness: f32,
    pub tilt_x: f32,
    pub spin_rate: f32, // rad/s around the ring axis
    pub color: u32,
}

pub const RINGS: [RingSpec; 3] = [
    RingSpec {
        height_frac: 0.4,
        radius: 4.0,
        thickness: 0.05,
        tilt_x: PI / 2.2,
        spin_rate: 0.5,
        color: BLUE,
    },
    RingSpec {
        height_frac: 0.6,
        radius: 3.0,
        thickness: 0.04,
        tilt_x: PI / 1.8,
        spin_rate: -0.8,
        color: PINK,
    },
    RingSpec {
        height_frac: 0.8,
        radius: 2.0,
        thickness: 0.03,
        tilt_x: PI / 2.0,
        spin_rate: 0.3,
        color: VIOLET,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
    pub center: Vec3,
    pub radius: f32,
    pub thickness: f32,
    pub tilt_x: f32,
    pub spin_z: f32,
    pub color: u32,
}

impl RingFrame {
    /// Box transforms approximating the torus, one per segment, in tower space.
    pub fn segment_transforms(&self, segments: usize) -> impl Iterator<Item = Mat4> + '_ {
        let segments = segments.max(3);
        let arc = TAU * self.radius / segments as f32;
        let base = Mat4::from_translation(self.center)
            * Mat4::from_rotation_x(self.tilt_x)
            * Mat4::from_rotation_z(self.spin_z);
        (0..segments).map(move |i| {
            let a = i as f32 / segments as f32 * TAU;
            base * Mat4::from_scale_rotation_translation(
                Vec3::new(self.thickness * 2.0, arc * 1.05, self.thickness * 2.0),
                Quat::from_rotation_z(a),
                Vec3::new(a.cos() * self.radius, a.sin() * self.radius, 0.0),
            )
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TowerFrame {
    pub height: f32,
    pub rings: [RingFrame; 3],
    pub beacon: Vec3,
}

impl TowerFrame {
    /// Spire box: tapered cylinder approximated by its mean width.
    pub fn spire_transform(&self) -> Mat4 {
        let w = TOWER_TOP_RADIUS + TOWER_BASE_RADIUS;
        Mat4::from_scale_rotation_translation(
            Vec3::new(w, self.height, w),
            Quat::IDENTITY,
            Vec3::new(0.0, self.height / 2.0, 0.0),
        )
    }

    pub fn beacon_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(BEACON_SIZE), Quat::IDENTITY, self.beacon)
    }
}

/// Ring angles are driven by elapsed time, not by tick count.
pub fn tower_frame(height: f32, elapsed_sec: f32) -> TowerFrame {
    let rings = RINGS.map(|spec| RingFrame {
        center: Vec3::new(0.0, height * spec.height_frac, 0.0),
        radius: spec.radius,
        thickness: spec.thickness,
        tilt_x: spec.tilt_x,
        spin_z: elapsed_sec * spec.spin_rate,
        color: spec.color,
    });
    TowerFrame {
        height,
        rings,
        beacon: Vec3::new(0.0, height, 0.0),
    }
}
