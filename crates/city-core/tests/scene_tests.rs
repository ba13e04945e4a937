// Scene assembly: per-frame derivation, tick accumulators and GPU packing.

use city_core::gpu::{cube_vertices, instance_count, pack_frame, scene_uniforms, InstanceRaw};
use city_core::sky::SkyLayers;
use city_core::tower::{tower_frame, RINGS};
use city_core::*;
use std::time::Duration;

fn bare_config() -> SceneConfig {
    SceneConfig {
        with_sky: false,
        ..SceneConfig::default()
    }
}

fn tick(n: u64, dt: f32) -> FrameTime {
    FrameTime::from_durations(
        Duration::from_secs_f32(n as f32 * dt),
        Duration::from_secs_f32(dt),
        n,
    )
}

#[test]
fn frame_is_a_pure_function_of_progress_and_time() {
    let scene = CityScene::new(bare_config(), 11);
    let a = scene.frame(0.37, 2.5);
    let b = scene.frame(0.37, 2.5);
    assert_eq!(a.structures, b.structures);
    assert_eq!(a.camera, b.camera);
}

#[test]
fn layout_survives_many_frames_unchanged() {
    let mut scene = CityScene::new(bare_config(), 8);
    let before = scene.field().structures().to_vec();
    for n in 1..=120 {
        let _ = scene.step(n as f32 / 120.0, &tick(n, 1.0 / 60.0));
    }
    assert_eq!(scene.field().structures(), &before[..]);
}

#[test]
fn structures_start_sunken_and_end_risen() {
    let scene = CityScene::new(bare_config(), 21);
    let start = scene.frame(0.0, 0.0);
    for s in &start.structures {
        assert!((s.position.y + s.height).abs() < 1e-5);
        assert_eq!(s.facade_opacity, 0.0);
    }
    let end = scene.frame(1.0, 0.0);
    for s in &end.structures {
        assert!((s.position.y - s.height / 2.0).abs() < 1e-5);
        assert!((s.facade_opacity - FACADE_MAX_OPACITY).abs() < 1e-6);
    }
}

#[test]
fn per_tick_spin_only_moves_every_third_structure() {
    let mut scene = CityScene::new(bare_config(), 4);
    for n in 1..=10 {
        scene.advance(&tick(n, 1.0 / 144.0));
    }
    assert!((scene.spin(0) - 10.0 * SPIN_STEP).abs() < 1e-6);
    assert!((scene.spin(3) - 10.0 * SPIN_STEP).abs() < 1e-6);
    assert_eq!(scene.spin(1), 0.0);
    assert_eq!(scene.spin(2), 0.0);
    assert!((scene.group_yaw() - 10.0 * GROUP_SPIN_STEP).abs() < 1e-6);
    let frame = scene.frame(0.5, 1.0);
    assert_eq!(frame.structures[3].yaw, scene.spin(3));
    assert_eq!(frame.group_yaw, scene.group_yaw());
}

#[test]
fn per_second_spin_is_refresh_rate_independent() {
    let config = SceneConfig {
        spin_mode: SpinMode::PerSecond,
        ..bare_config()
    };
    let mut fast = CityScene::new(config.clone(), 4);
    let mut slow = CityScene::new(config, 4);
    for n in 1..=120 {
        fast.advance(&tick(n, 1.0 / 120.0));
    }
    for n in 1..=30 {
        slow.advance(&tick(n, 1.0 / 30.0));
    }
    assert!((fast.spin(0) - slow.spin(0)).abs() < 1e-4);
    assert!((fast.spin(0) - 60.0 * SPIN_STEP).abs() < 1e-3);
}

#[test]
fn spin_lookup_out_of_range_is_zero() {
    let scene = CityScene::new(bare_config(), 0);
    assert_eq!(scene.spin(10_000), 0.0);
}

#[test]
fn tower_rings_spin_with_time() {
    let t0 = tower_frame(TOWER_HEIGHT, 0.0);
    let t2 = tower_frame(TOWER_HEIGHT, 2.0);
    for (i, spec) in RINGS.iter().enumerate() {
        assert_eq!(t0.rings[i].spin_z, 0.0);
        assert!((t2.rings[i].spin_z - 2.0 * spec.spin_rate).abs() < 1e-6);
        assert!((t2.rings[i].center.y - TOWER_HEIGHT * spec.height_frac).abs() < 1e-5);
    }
    assert_eq!(t2.beacon.y, TOWER_HEIGHT);
    assert_eq!(t0.rings[0].segment_transforms(RING_SEGMENTS).count(), RING_SEGMENTS);
}

#[test]
fn floating_core_bobs_around_its_anchor() {
    for step in 0..100 {
        let pose = core_pose(step as f32 * 0.3);
        let dy = pose.position.y - CORE_POSITION[1];
        assert!(dy.abs() <= CORE_FLOAT_INTENSITY / 10.0 + 1e-6);
        assert_eq!(pose.position.x, CORE_POSITION[0]);
    }
}

#[test]
fn packed_instance_count_matches_layout() {
    let scene = CityScene::new(bare_config(), 9);
    let frame = scene.frame(0.5, 1.0);
    let mut out = Vec::new();
    pack_frame(&frame, scene.sky(), &mut out);
    assert_eq!(out.len(), instance_count(STRUCTURE_COUNT, scene.sky()));
    // buildings follow the floor in index order and keep their emission
    for (i, s) in frame.structures.iter().enumerate() {
        assert_eq!(out[1 + i].params[0], s.emissive);
        assert_eq!(out[1 + i].params[1], s.facade_opacity);
    }
}

#[test]
fn sky_layers_are_seeded_with_the_scene() {
    let a = CityScene::new(SceneConfig::default(), 77);
    let b = CityScene::new(SceneConfig::default(), 77);
    assert_eq!(
        a.sky().particle_count(),
        STAR_COUNT + SPARKLE_SPEEDS.len() * SPARKLE_COUNT
    );
    assert_eq!(
        a.sky().fields[0].particles()[..16],
        b.sky().fields[0].particles()[..16]
    );
    let mut out = Vec::new();
    pack_frame(&a.frame(0.2, 0.0), a.sky(), &mut out);
    assert_eq!(out.len(), instance_count(STRUCTURE_COUNT, a.sky()));
}

#[test]
fn empty_sky_adds_no_particles() {
    assert_eq!(SkyLayers::default().particle_count(), 0);
}

#[test]
fn gpu_layouts_have_expected_sizes() {
    assert_eq!(InstanceRaw::SIZE, 112);
    assert_eq!(std::mem::size_of::<gpu::SceneUniforms>(), 192);
    assert_eq!(std::mem::size_of::<gpu::CubeVertex>(), 24);
    assert_eq!(cube_vertices().len(), 36);
}

#[test]
fn uniforms_carry_fog_and_tonemap_flag() {
    let cam = Camera::new(1.5);
    let u = scene_uniforms(&cam, 3.0, true);
    assert_eq!(u.params, [FOG_NEAR, FOG_FAR, 3.0, 1.0]);
    let u = scene_uniforms(&cam, 3.0, false);
    assert_eq!(u.params[3], 0.0);
}

#[test]
fn hex_colors_convert_to_linear() {
    assert!(hex_rgb(0xffffff).abs_diff_eq(glam::Vec3::ONE, 1e-5));
    assert_eq!(hex_rgb(0x000000), glam::Vec3::ZERO);
    let pink = hex_rgb(PINK);
    assert!(pink.x > pink.z && pink.z > pink.y);
}
