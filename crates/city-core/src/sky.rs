//! Background particles: a distant star shell and two drifting sparkle clouds.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

// World size of a unit star/sparkle size factor.
const STAR_SIZE_TO_WORLD: f32 = 0.08;
const SPARKLE_SIZE_TO_WORLD: f32 = 0.05;
const SPARKLE_BOB_AMPLITUDE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleKind {
    Stars { twinkle_speed: f32 },
    Sparkles { speed: f32, color: u32, opacity: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub phase: f32,
    pub size: f32,
    pub tint: Vec3,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    pub kind: ParticleKind,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Animated position; stars are fixed, sparkles bob vertically.
    pub fn position_at(&self, p: &Particle, elapsed_sec: f32) -> Vec3 {
        match self.kind {
            ParticleKind::Stars { .. } => p.position,
            ParticleKind::Sparkles { speed, .. } => {
                p.position
                    + Vec3::Y * (elapsed_sec * speed + p.phase).sin() * SPARKLE_BOB_AMPLITUDE
            }
        }
    }

    /// Brightness multiplier in [0, 1].
    pub fn brightness_at(&self, p: &Particle, elapsed_sec: f32) -> f32 {
        match self.kind {
            ParticleKind::Stars { twinkle_speed } => {
                0.6 + 0.4 * (elapsed_sec * twinkle_speed + p.phase).sin()
            }
            ParticleKind::Sparkles { speed, opacity, .. } => {
                opacity * (0.5 + 0.5 * (elapsed_sec * speed * 2.0 + p.phase).sin())
            }
        }
    }
}

/// Stars on spherical shells between `radius` and `radius + depth`.
pub fn star_shell<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: f32,
    depth: f32,
    factor: f32,
    saturation: f32,
) -> ParticleField {
    let particles = (0..count)
        .map(|_| {
            let u: f32 = rng.gen_range(-1.0..=1.0);
            let phi = rng.gen::<f32>() * TAU;
            let ring = (1.0 - u * u).max(0.0).sqrt();
            let dir = Vec3::new(ring * phi.cos(), u, ring * phi.sin());
            let r = radius + rng.gen::<f32>() * depth;
            Particle {
                position: dir * r,
                phase: rng.gen::<f32>() * TAU,
                size: (0.5 + 0.5 * rng.gen::<f32>()) * factor * STAR_SIZE_TO_WORLD,
                tint: hsl_to_rgb(rng.gen::<f32>(), saturation, 0.9),
            }
        })
        .collect();
    ParticleField {
        kind: ParticleKind::Stars {
            twinkle_speed: STAR_TWINKLE_SPEED,
        },
        particles,
    }
}

/// Sparkles scattered through a `scale`-sized cube centered on the origin.
pub fn sparkle_cloud<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    scale: f32,
    size: f32,
    speed: f32,
    color: u32,
    opacity: f32,
) -> ParticleField {
    let tint = hex_rgb(color);
    let particles = (0..count)
        .map(|_| Particle {
            position: Vec3::new(
                (rng.gen::<f32>() - 0.5) * scale,
                (rng.gen::<f32>() - 0.5) * scale,
                (rng.gen::<f32>() - 0.5) * scale,
            ),
            phase: rng.gen::<f32>() * TAU,
            size: size * (0.5 + 0.5 * rng.gen::<f32>()) * SPARKLE_SIZE_TO_WORLD,
            tint,
        })
        .collect();
    ParticleField {
        kind: ParticleKind::Sparkles {
            speed,
            color,
            opacity,
        },
        particles,
    }
}

/// Every particle layer of the backdrop.
#[derive(Clone, Debug, Default)]
pub struct SkyLayers {
    pub fields: Vec<ParticleField>,
}

impl SkyLayers {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut fields = vec![star_shell(
            rng,
            STAR_COUNT,
            STAR_RADIUS,
            STAR_DEPTH,
            STAR_FACTOR,
            STAR_SATURATION,
        )];
        for (speed, color) in SPARKLE_SPEEDS.into_iter().zip([PINK, BLUE]) {
            fields.push(sparkle_cloud(
                rng,
                SPARKLE_COUNT,
                SPARKLE_SCALE,
                SPARKLE_SIZE,
                speed,
                color,
                SPARKLE_OPACITY,
            ));
        }
        Self { fields }
    }

    pub fn particle_count(&self) -> usize {
        self.fields.iter().map(ParticleField::len).sum()
    }
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h * 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Vec3::new(r + m, g + m, b + m)
}
