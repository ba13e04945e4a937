//! One-shot procedural layout of the decorative structures around the tower.
//!
//! A [`StructureField`] is generated once per session and never changes
//! afterwards; the animator only derives per-frame values from it.

use crate::animate::rise_start;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// A single decorative building.
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    pub id: usize,
    pub angular_position: f32,
    pub radial_distance: f32,
    pub height: f32,
    pub width: f32,
    pub base_color: u32,
    pub glow_color: u32,
    pub rise_offset: f32,
}

impl Structure {
    /// Ground-plane anchor (y = 0) before any animation is applied.
    pub fn ground_position(&self) -> Vec3 {
        Vec3::new(
            self.angular_position.cos() * self.radial_distance,
            0.0,
            self.angular_position.sin() * self.radial_distance,
        )
    }
}

#[derive(Clone, Debug)]
pub struct FieldParams {
    pub count: usize,
    pub inner_radius: f32,
    pub radial_range: f32,
    pub angle_jitter: f32,
    pub height_min: f32,
    pub height_range: f32,
    pub width_min: f32,
    pub width_range: f32,
    pub palette: Vec<u32>,
    pub glow_palette: Vec<u32>,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: STRUCTURE_COUNT,
            inner_radius: INNER_RADIUS,
            radial_range: RADIAL_RANGE,
            angle_jitter: ANGLE_JITTER,
            height_min: HEIGHT_MIN,
            height_range: HEIGHT_RANGE,
            width_min: WIDTH_MIN,
            width_range: WIDTH_RANGE,
            palette: BASE_PALETTE.to_vec(),
            glow_palette: GLOW_PALETTE.to_vec(),
        }
    }
}

/// Immutable set of structures covering a roughly circular footprint.
#[derive(Clone, Debug)]
pub struct StructureField {
    structures: Vec<Structure>,
}

impl StructureField {
    pub fn generate<R: Rng + ?Sized>(params: &FieldParams, rng: &mut R) -> Self {
        let palette: &[u32] = if params.palette.is_empty() {
            &BASE_PALETTE
        } else {
            &params.palette
        };
        let glow_palette: &[u32] = if params.glow_palette.is_empty() {
            &GLOW_PALETTE
        } else {
            &params.glow_palette
        };
        let n = params.count;
        let structures = (0..n)
            .map(|i| {
                // Draw order is part of the seeded layout: angle, radius, height, width.
                let angular_position =
                    i as f32 / n as f32 * TAU + rng.gen::<f32>() * params.angle_jitter;
                let radial_distance = params.inner_radius + rng.gen::<f32>() * params.radial_range;
                let height = params.height_min + rng.gen::<f32>() * params.height_range;
                let width = params.width_min + rng.gen::<f32>() * params.width_range;
                Structure {
                    id: i,
                    angular_position,
                    radial_distance,
                    height,
                    width,
                    base_color: palette[i % palette.len()],
                    glow_color: glow_palette[i % glow_palette.len()],
                    rise_offset: rise_start(i),
                }
            })
            .collect::<Vec<_>>();
        log::debug!("[field] generated {} structures", structures.len());
        Self { structures }
    }

    pub fn seeded(params: &FieldParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(params, &mut rng)
    }

    /// Fresh layout per session, like the live site.
    pub fn from_entropy(params: &FieldParams) -> Self {
        let mut rng = StdRng::from_entropy();
        Self::generate(params, &mut rng)
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}
