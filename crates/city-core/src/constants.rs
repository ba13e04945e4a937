use glam::Vec3;

// Shared layout/animation tuning constants used by both web and native frontends.

// Structure field layout
pub const STRUCTURE_COUNT: usize = 60;
pub const INNER_RADIUS: f32 = 8.0; // closest a structure may stand to the tower
pub const RADIAL_RANGE: f32 = 30.0; // radial band width beyond INNER_RADIUS
pub const ANGLE_JITTER: f32 = 0.5; // max random offset added to the even angular spread (rad)
pub const HEIGHT_MIN: f32 = 4.0;
pub const HEIGHT_RANGE: f32 = 12.0;
pub const WIDTH_MIN: f32 = 1.2;
pub const WIDTH_RANGE: f32 = 1.8;

// Rise animation
pub const RISE_STAGGER: f32 = 0.01; // progress delay per structure index
pub const RISE_STAGGER_WRAP: f32 = 0.5; // stagger cycles within the first half of the scroll
pub const RISE_RATE: f32 = 3.0; // full rise spans 1/RISE_RATE of total progress

// Per-tick spin
pub const SPIN_STEP: f32 = 0.005; // rad per tick for spinning structures
pub const SPIN_EVERY: usize = 3; // every third structure spins
pub const GROUP_SPIN_STEP: f32 = 0.001; // rad per tick for the whole city group
pub const REFERENCE_HZ: f32 = 60.0; // tick rate the per-tick steps were tuned at

// Facade panels
pub const FACADE_MAX_OPACITY: f32 = 0.3;
pub const FACADE_EMISSIVE: f32 = 2.0;

// Camera path
pub const CAMERA_BASE_RADIUS: f32 = 35.0;
pub const CAMERA_RADIUS_SHRINK: f32 = 15.0;
pub const CAMERA_BASE_HEIGHT: f32 = 15.0;
pub const CAMERA_HEIGHT_SWING: f32 = 10.0;
pub const LOOK_AT_BASE_HEIGHT: f32 = 5.0;
pub const LOOK_AT_RISE: f32 = 10.0;
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 400.0;

// Sky tower
pub const TOWER_HEIGHT: f32 = 45.0;
pub const TOWER_TOP_RADIUS: f32 = 0.2;
pub const TOWER_BASE_RADIUS: f32 = 0.8;
pub const TOWER_EMISSIVE: f32 = 2.0;
pub const BEACON_SIZE: f32 = 1.0;
pub const BEACON_EMISSIVE: f32 = 10.0;
pub const RING_SEGMENTS: usize = 48;
pub const RING_EMISSIVE: f32 = 5.0;

// Floor
pub const FLOOR_RADIUS: f32 = 100.0;
pub const FLOOR_Y: f32 = -0.2;

// Fog (linear, world units from the eye)
pub const FOG_NEAR: f32 = 30.0;
pub const FOG_FAR: f32 = 80.0;

// Lights
pub const AMBIENT_LIGHT: f32 = 0.05;
pub const KEY_LIGHT_POS: [f32; 3] = [20.0, 20.0, 20.0];
pub const FILL_LIGHT_POS: [f32; 3] = [-20.0, 20.0, -20.0];
pub const POINT_LIGHT_INTENSITY: f32 = 2.0;

// Floating core
pub const CORE_POSITION: [f32; 3] = [15.0, 20.0, -10.0];
pub const CORE_SIZE: f32 = 2.0;
pub const CORE_FLOAT_SPEED: f32 = 4.0;
pub const CORE_ROTATION_INTENSITY: f32 = 1.0;
pub const CORE_FLOAT_INTENSITY: f32 = 2.0;
pub const CORE_EMISSIVE: f32 = 2.0;

// Star shell
pub const STAR_COUNT: usize = 7000;
pub const STAR_RADIUS: f32 = 150.0;
pub const STAR_DEPTH: f32 = 50.0;
pub const STAR_FACTOR: f32 = 4.0;
pub const STAR_SATURATION: f32 = 0.5;
pub const STAR_TWINKLE_SPEED: f32 = 2.0;

// Sparkle clouds
pub const SPARKLE_COUNT: usize = 400;
pub const SPARKLE_SCALE: f32 = 60.0;
pub const SPARKLE_SIZE: f32 = 3.0;
pub const SPARKLE_OPACITY: f32 = 0.5;
pub const SPARKLE_SPEEDS: [f32; 2] = [0.5, 0.4];

// Palette (sRGB hex, converted with `hex_rgb`)
pub const BASE_PALETTE: [u32; 3] = [0x0f172a, 0x1e1b4b, 0x1e293b];
pub const GLOW_PALETTE: [u32; 3] = [0xec4899, 0x3b82f6, 0xd946ef];
pub const FACADE_COLOR: u32 = 0x22d3ee;
pub const TOWER_COLOR: u32 = 0x1e1b4b;
pub const PINK: u32 = 0xec4899;
pub const BLUE: u32 = 0x3b82f6;
pub const VIOLET: u32 = 0x8b5cf6;
pub const FLOOR_COLOR: u32 = 0x02020a;
pub const FOG_COLOR: u32 = 0x020210;

/// Convert a packed `0xRRGGBB` sRGB color into linear RGB.
pub fn hex_rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
