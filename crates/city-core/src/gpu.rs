//! GPU-facing data shared by the web and native renderers.
//!
//! Both front-ends draw the whole scene as instanced unit cubes with one
//! pipeline; this module owns the vertex/instance/uniform layouts and turns a
//! [`SceneFrame`] into instance data.

use crate::camera::Camera;
use crate::constants::*;
use crate::scene::SceneFrame;
use crate::sky::SkyLayers;
use glam::{Mat4, Quat, Vec3, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-instance data: model matrix, base/glow colors and shading params.
///
/// `params` = `[emissive, facade, fog_amount, unlit]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub glow: [f32; 4],
    pub params: [f32; 4],
}

impl InstanceRaw {
    pub const SIZE: u64 = std::mem::size_of::<InstanceRaw>() as u64;

    fn lit(model: Mat4, color: Vec3, glow: Vec3, emissive: f32, facade: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
            glow: glow.extend(1.0).to_array(),
            params: [emissive, facade, 1.0, 0.0],
        }
    }

    fn unlit(model: Mat4, color: Vec3, emissive: f32, fog_amount: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
            glow: [0.0; 4],
            params: [emissive, 0.0, fog_amount, 1.0],
        }
    }
}

/// Scene-wide uniforms; `params` = `[fog_near, fog_far, time, tonemap]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub fog_color: [f32; 4],
    pub facade_color: [f32; 4],
    pub key_light_pos: [f32; 4],
    pub key_light_color: [f32; 4],
    pub fill_light_pos: [f32; 4],
    pub fill_light_color: [f32; 4],
    pub params: [f32; 4],
}

/// `tonemap` is set when the pass writes straight to an LDR surface.
pub fn scene_uniforms(camera: &Camera, elapsed_sec: f32, tonemap: bool) -> SceneUniforms {
    SceneUniforms {
        view_proj: camera.view_proj().to_cols_array_2d(),
        eye: camera.eye.extend(1.0).to_array(),
        fog_color: hex_rgb(FOG_COLOR).extend(1.0).to_array(),
        facade_color: hex_rgb(FACADE_COLOR).extend(FACADE_EMISSIVE).to_array(),
        key_light_pos: Vec3::from(KEY_LIGHT_POS)
            .extend(POINT_LIGHT_INTENSITY)
            .to_array(),
        key_light_color: hex_rgb(PINK).extend(AMBIENT_LIGHT).to_array(),
        fill_light_pos: Vec3::from(FILL_LIGHT_POS)
            .extend(POINT_LIGHT_INTENSITY)
            .to_array(),
        fill_light_color: hex_rgb(BLUE).extend(0.0).to_array(),
        params: [
            FOG_NEAR,
            FOG_FAR,
            elapsed_sec,
            if tonemap { 1.0 } else { 0.0 },
        ],
    }
}

/// Unit cube centered on the origin, 36 non-indexed vertices.
pub fn cube_vertices() -> Vec<CubeVertex> {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // normal, u axis, v axis
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let mut out = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        let n = Vec3::from(n);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        let corner = |su: f32, sv: f32| CubeVertex {
            pos: (n * 0.5 + u * (0.5 * su) + v * (0.5 * sv)).to_array(),
            normal: n.to_array(),
        };
        // counter-clockwise when viewed from outside
        out.extend([
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ]);
    }
    out
}

/// Number of instances `pack_frame` emits for a frame with `structures`
/// buildings and the given sky.
pub fn instance_count(structures: usize, sky: &SkyLayers) -> usize {
    // floor + buildings + spire + ring segments + beacon + core + particles
    1 + structures + 1 + 3 * RING_SEGMENTS + 1 + 1 + sky.particle_count()
}

/// Replace `out` with every drawable of `frame` in a stable order.
pub fn pack_frame(frame: &SceneFrame, sky: &SkyLayers, out: &mut Vec<InstanceRaw>) {
    out.clear();
    out.reserve(instance_count(frame.structures.len(), sky));
    let group = frame.group_transform();
    let t = frame.elapsed_sec;

    out.push(InstanceRaw::lit(
        group
            * Mat4::from_scale_rotation_translation(
                Vec3::new(FLOOR_RADIUS * 2.0, 0.05, FLOOR_RADIUS * 2.0),
                Quat::IDENTITY,
                Vec3::new(0.0, FLOOR_Y - 0.025, 0.0),
            ),
        hex_rgb(FLOOR_COLOR),
        Vec3::ZERO,
        0.0,
        0.0,
    ));

    for s in &frame.structures {
        out.push(InstanceRaw::lit(
            group * s.local_transform(),
            hex_rgb(s.base_color),
            hex_rgb(s.glow_color),
            s.emissive,
            s.facade_opacity,
        ));
    }

    let tower = &frame.tower;
    out.push(InstanceRaw::lit(
        group * tower.spire_transform(),
        hex_rgb(TOWER_COLOR),
        hex_rgb(PINK),
        TOWER_EMISSIVE,
        0.0,
    ));
    for ring in &tower.rings {
        let c = hex_rgb(ring.color);
        for m in ring.segment_transforms(RING_SEGMENTS) {
            out.push(InstanceRaw::unlit(group * m, c, RING_EMISSIVE, 1.0));
        }
    }
    out.push(InstanceRaw::unlit(
        group * tower.beacon_transform(),
        hex_rgb(PINK),
        BEACON_EMISSIVE,
        1.0,
    ));
    out.push(InstanceRaw::unlit(
        group * frame.core.transform(),
        hex_rgb(PINK),
        CORE_EMISSIVE,
        1.0,
    ));

    // Sky particles live outside the rotating group and ignore fog.
    for field in &sky.fields {
        for p in field.particles() {
            let pos = field.position_at(p, t);
            let b = field.brightness_at(p, t);
            let model = Mat4::from_scale_rotation_translation(Vec3::splat(p.size), Quat::IDENTITY, pos);
            out.push(InstanceRaw::unlit(model, p.tint * b, 0.0, 0.0));
        }
    }
}

/// Clip-space position of a world point, handy for sanity checks.
pub fn project(view_proj: Mat4, world: Vec3) -> Vec4 {
    view_proj * world.extend(1.0)
}
