//! Scene assembly: the one-time layout plus the per-tick accumulators, turned
//! into a [`SceneFrame`] every rendered frame.

use crate::animate::{
    current_rise, emissive_intensity, facade_opacity, spins, vertical_offset, SpinMode,
};
use crate::camera::{camera_pose, CameraPose};
use crate::clock::FrameTime;
use crate::constants::*;
use crate::field::{FieldParams, StructureField};
use crate::sky::SkyLayers;
use crate::tower::{tower_frame, TowerFrame};
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub field: FieldParams,
    pub spin_mode: SpinMode,
    pub tower_height: f32,
    pub with_sky: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            field: FieldParams::default(),
            spin_mode: SpinMode::PerTick,
            tower_height: TOWER_HEIGHT,
            with_sky: true,
        }
    }
}

/// Render state of one structure, in city-group space.
#[derive(Clone, Debug, PartialEq)]
pub struct StructureFrame {
    pub index: usize,
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub yaw: f32,
    pub rise: f32,
    pub emissive: f32,
    pub facade_opacity: f32,
    pub base_color: u32,
    pub glow_color: u32,
}

impl StructureFrame {
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.width, self.height, self.width),
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

/// Floating core placement: bob offset and wobble angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorePose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CorePose {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(CORE_SIZE),
            Quat::from_euler(
                glam::EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ),
            self.position,
        )
    }
}

pub fn core_pose(elapsed_sec: f32) -> CorePose {
    let t = elapsed_sec / 4.0 * CORE_FLOAT_SPEED;
    let bob = t.sin() / 10.0 * CORE_FLOAT_INTENSITY;
    CorePose {
        position: Vec3::from(CORE_POSITION) + Vec3::Y * bob,
        rotation: Vec3::new(t.cos() / 8.0, t.sin() / 8.0, t.sin() / 20.0) * CORE_ROTATION_INTENSITY,
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    pub progress: f32,
    pub elapsed_sec: f32,
    pub camera: CameraPose,
    pub group_yaw: f32,
    pub structures: Vec<StructureFrame>,
    pub tower: TowerFrame,
    pub core: CorePose,
}

impl SceneFrame {
    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.group_yaw)
    }
}

pub struct CityScene {
    config: SceneConfig,
    field: StructureField,
    sky: SkyLayers,
    spin: Vec<f32>,
    group_yaw: f32,
}

impl CityScene {
    /// Fully reproducible scene: the same seed yields the same city and sky.
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        let field = StructureField::seeded(&config.field, seed);
        let sky = if config.with_sky {
            let mix = seed ^ 0x9E37_79B9_7F4A_7C15;
            SkyLayers::generate(&mut StdRng::seed_from_u64(mix))
        } else {
            SkyLayers::default()
        };
        Self::with_layout(config, field, sky)
    }

    /// Unseeded session layout.
    pub fn from_entropy(config: SceneConfig) -> Self {
        Self::new(config, StdRng::from_entropy().gen())
    }

    pub fn with_layout(config: SceneConfig, field: StructureField, sky: SkyLayers) -> Self {
        log::info!(
            "[scene] structures={} particles={} spin={:?}",
            field.len(),
            sky.particle_count(),
            config.spin_mode
        );
        let spin = vec![0.0; field.len()];
        Self {
            config,
            field,
            sky,
            spin,
            group_yaw: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn field(&self) -> &StructureField {
        &self.field
    }

    pub fn sky(&self) -> &SkyLayers {
        &self.sky
    }

    pub fn spin(&self, index: usize) -> f32 {
        self.spin.get(index).copied().unwrap_or(0.0)
    }

    pub fn group_yaw(&self) -> f32 {
        self.group_yaw
    }

    /// Apply one rendered tick of the rotation accumulators.
    pub fn advance(&mut self, time: &FrameTime) {
        let mode = self.config.spin_mode;
        let step = mode.step(SPIN_STEP, time.dt_sec);
        for (i, r) in self.spin.iter_mut().enumerate() {
            if spins(i) {
                *r += step;
            }
        }
        self.group_yaw += mode.step(GROUP_SPIN_STEP, time.dt_sec);
    }

    pub fn frame(&self, progress: f32, elapsed_sec: f32) -> SceneFrame {
        let structures = self
            .field
            .structures()
            .iter()
            .map(|s| {
                let rise = current_rise(progress, s.id);
                let ground = s.ground_position();
                StructureFrame {
                    index: s.id,
                    position: Vec3::new(ground.x, vertical_offset(s.height, rise), ground.z),
                    width: s.width,
                    height: s.height,
                    yaw: self.spin(s.id),
                    rise,
                    emissive: emissive_intensity(elapsed_sec, s.id),
                    facade_opacity: facade_opacity(rise),
                    base_color: s.base_color,
                    glow_color: s.glow_color,
                }
            })
            .collect();
        SceneFrame {
            progress: crate::animate::clamp_progress(progress),
            elapsed_sec,
            camera: camera_pose(progress),
            group_yaw: self.group_yaw,
            structures,
            tower: tower_frame(self.config.tower_height, elapsed_sec),
            core: core_pose(elapsed_sec),
        }
    }

    /// Advance one tick, then build that tick's frame.
    pub fn step(&mut self, progress: f32, time: &FrameTime) -> SceneFrame {
        self.advance(time);
        self.frame(progress, time.elapsed_sec)
    }
}
