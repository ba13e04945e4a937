// Structure-field generator: reproducibility, bounds and palette assignment.

use city_core::*;
use std::f32::consts::TAU;

fn tuples(field: &StructureField) -> Vec<(f32, f32, f32, f32)> {
    field
        .structures()
        .iter()
        .map(|s| (s.angular_position, s.radial_distance, s.height, s.width))
        .collect()
}

#[test]
fn same_seed_yields_same_layout() {
    let params = FieldParams::default();
    let a = StructureField::seeded(&params, 42);
    let b = StructureField::seeded(&params, 42);
    assert_eq!(tuples(&a), tuples(&b));
}

#[test]
fn different_seeds_yield_different_layouts() {
    let params = FieldParams::default();
    let a = StructureField::seeded(&params, 1);
    let b = StructureField::seeded(&params, 2);
    assert_ne!(tuples(&a), tuples(&b));
}

#[test]
fn default_field_has_sixty_structures_with_stable_ids() {
    let field = StructureField::seeded(&FieldParams::default(), 7);
    assert_eq!(field.len(), STRUCTURE_COUNT);
    for (i, s) in field.structures().iter().enumerate() {
        assert_eq!(s.id, i);
        assert_eq!(s.rise_offset, rise_start(i));
    }
}

#[test]
fn parameters_respect_bounds() {
    let params = FieldParams::default();
    let field = StructureField::seeded(&params, 99);
    let n = params.count as f32;
    for s in field.structures() {
        let base = s.id as f32 / n * TAU;
        let jitter = s.angular_position - base;
        assert!(
            (-1e-5..=ANGLE_JITTER + 1e-5).contains(&jitter),
            "jitter {jitter}"
        );
        assert!(s.radial_distance >= INNER_RADIUS);
        assert!(s.radial_distance <= INNER_RADIUS + RADIAL_RANGE);
        assert!(s.height >= HEIGHT_MIN && s.height <= HEIGHT_MIN + HEIGHT_RANGE);
        assert!(s.width >= WIDTH_MIN && s.width <= WIDTH_MIN + WIDTH_RANGE);
    }
}

#[test]
fn ground_position_matches_polar_coordinates() {
    let field = StructureField::seeded(&FieldParams::default(), 3);
    for s in field.structures() {
        let p = s.ground_position();
        assert_eq!(p.y, 0.0);
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!((r - s.radial_distance).abs() < 1e-3);
    }
}

#[test]
fn palette_is_indexed_by_id() {
    let field = StructureField::seeded(&FieldParams::default(), 5);
    for s in field.structures() {
        assert_eq!(s.base_color, BASE_PALETTE[s.id % BASE_PALETTE.len()]);
        assert_eq!(s.glow_color, GLOW_PALETTE[s.id % GLOW_PALETTE.len()]);
    }
}

#[test]
fn empty_palettes_fall_back_to_defaults() {
    let params = FieldParams {
        count: 4,
        palette: vec![],
        glow_palette: vec![],
        ..FieldParams::default()
    };
    let field = StructureField::seeded(&params, 0);
    assert_eq!(field.structures()[3].base_color, BASE_PALETTE[0]);
    assert_eq!(field.structures()[1].glow_color, GLOW_PALETTE[1]);
}

#[test]
fn custom_palette_cycles() {
    let params = FieldParams {
        count: 5,
        palette: vec![0x111111, 0x222222],
        ..FieldParams::default()
    };
    let field = StructureField::seeded(&params, 0);
    let colors: Vec<u32> = field.structures().iter().map(|s| s.base_color).collect();
    assert_eq!(colors, vec![0x111111, 0x222222, 0x111111, 0x222222, 0x111111]);
}

#[test]
fn zero_count_produces_empty_field() {
    let params = FieldParams {
        count: 0,
        ..FieldParams::default()
    };
    let field = StructureField::seeded(&params, 0);
    assert!(field.is_empty());
}

#[test]
fn entropy_field_uses_default_shape() {
    let field = StructureField::from_entropy(&FieldParams::default());
    assert_eq!(field.len(), STRUCTURE_COUNT);
}
