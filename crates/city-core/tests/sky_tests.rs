// Star shell and sparkle clouds.

use city_core::sky::*;
use city_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn stars_sit_on_the_distant_shell() {
    let mut rng = StdRng::seed_from_u64(1);
    let stars = star_shell(&mut rng, 500, STAR_RADIUS, STAR_DEPTH, STAR_FACTOR, STAR_SATURATION);
    assert_eq!(stars.len(), 500);
    for p in stars.particles() {
        let r = p.position.length();
        assert!(r >= STAR_RADIUS - 1e-2 && r <= STAR_RADIUS + STAR_DEPTH + 1e-2, "radius {r}");
        assert!(p.size > 0.0);
        // stars never move
        assert_eq!(stars.position_at(p, 12.0), p.position);
    }
}

#[test]
fn brightness_stays_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(2);
    let sky = SkyLayers::generate(&mut rng);
    for field in &sky.fields {
        for p in field.particles().iter().take(50) {
            for step in 0..40 {
                let b = field.brightness_at(p, step as f32 * 0.25);
                assert!((0.0..=1.0).contains(&b), "brightness {b}");
            }
        }
    }
}

#[test]
fn sparkles_bob_inside_their_cube() {
    let mut rng = StdRng::seed_from_u64(3);
    let cloud = sparkle_cloud(&mut rng, 100, SPARKLE_SCALE, SPARKLE_SIZE, 0.5, PINK, SPARKLE_OPACITY);
    let half = SPARKLE_SCALE / 2.0;
    for p in cloud.particles() {
        assert!(p.position.abs().max_element() <= half);
        let moved = cloud.position_at(p, 3.0);
        assert_eq!(moved.x, p.position.x);
        assert_eq!(moved.z, p.position.z);
        assert!((moved.y - p.position.y).abs() <= 0.5 + 1e-6);
    }
    assert_eq!(cloud.particles()[0].tint, hex_rgb(PINK));
}

#[test]
fn hsl_primaries() {
    assert!(hsl_to_rgb(0.0, 1.0, 0.5).abs_diff_eq(glam::Vec3::X, 1e-5));
    assert!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5).abs_diff_eq(glam::Vec3::Y, 1e-5));
    assert!(hsl_to_rgb(0.5, 0.0, 0.9).abs_diff_eq(glam::Vec3::splat(0.9), 1e-5));
}
