use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Radius of the ribbon's center circle.
pub const RING_RADIUS: f32 = 0.5;
/// World-space half-width of the ribbon: lateral ±1 maps to ±0.10.
pub const LATERAL_EXTENT: f32 = 0.10;
/// Offset along the local thickness axis: vertical ±1 selects a face.
pub const FACE_OFFSET: f32 = 0.04;
/// Uniform size normalization applied to every entity on the surface.
pub const ENTITY_SCALE: f32 = 0.6;

/// Map intrinsic ribbon coordinates to a world transform.
///
/// `angle` is the position around the loop in radians, `lateral` the
/// normalized position across the ribbon width in [-1, 1], `vertical` the
/// normalized side selector in [-1, 1]. The function is total: out-of-range
/// inputs are not rejected here, callers keep their targets clamped.
///
/// The composition order and coefficients are tuned together; the tilt term
/// uses the full angle (not angle/2), so one loop is the reference visual,
/// not a topologically exact single twist.
pub fn surface_transform(angle: f32, lateral: f32, vertical: f32) -> Mat4 {
    let (sin_a, cos_a) = angle.sin_cos();
    // Tangent direction a quarter turn ahead; also the tilt axis.
    let (sin_t, cos_t) = (angle + FRAC_PI_2).sin_cos();

    let translate_xy =
        Mat4::from_translation(Vec3::new(RING_RADIUS * cos_a, RING_RADIUS * sin_a, 0.0));
    let rot_x = Mat4::from_axis_angle(Vec3::new(cos_t, sin_t, 0.0), -angle + FRAC_PI_2);
    let translate_y = Mat4::from_translation(Vec3::new(
        -lateral * LATERAL_EXTENT * sin_t,
        lateral * LATERAL_EXTENT * cos_t,
        0.0,
    ));
    let translate_z = Mat4::from_translation(Vec3::new(0.0, 0.0, vertical * FACE_OFFSET));
    let rot_z = Mat4::from_rotation_z(angle + FRAC_PI_2);
    let scale = Mat4::from_scale(Vec3::splat(ENTITY_SCALE));

    translate_xy * rot_x * translate_y * translate_z * rot_z * scale
}

/// World-space point on the ribbon's mid-surface at the given intrinsic
/// coordinates. Used to tessellate the strip so it passes exactly through
/// the positions entities occupy.
pub fn surface_point(angle: f32, lateral: f32) -> Vec3 {
    surface_transform(angle, lateral, 0.0).transform_point3(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_is_deterministic() {
        let a = surface_transform(1.234, -0.5, 1.0);
        let b = surface_transform(1.234, -0.5, 1.0);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn test_transform_at_angle_zero() {
        // At angle 0 the lateral offset vanishes and the composition reduces
        // to translate(0.5,0,0) * tilt(90° about +Y) * translate(0,0,0.04)
        // * rotate(90° about +Z) * scale(0.6).
        let got = surface_transform(0.0, 0.0, 1.0);

        let expected = Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0))
            * Mat4::from_axis_angle(
                Vec3::new(FRAC_PI_2.cos(), FRAC_PI_2.sin(), 0.0),
                FRAC_PI_2,
            )
            * Mat4::from_translation(Vec3::new(0.0, 0.0, 0.04))
            * Mat4::from_rotation_z(FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(0.6));

        let got = got.to_cols_array();
        let expected = expected.to_cols_array();
        for i in 0..16 {
            assert!(
                (got[i] - expected[i]).abs() < 1e-6,
                "component {i}: {} vs {}",
                got[i],
                expected[i]
            );
        }
    }

    #[test]
    fn test_lateral_span_is_constant() {
        // The two ribbon edges stay a fixed world distance apart all the way
        // around the loop (the offset is applied inside a rigid rotation).
        for i in 0..12 {
            let angle = i as f32 * std::f32::consts::TAU / 12.0;
            let inner = surface_point(angle, -1.0);
            let outer = surface_point(angle, 1.0);
            let span = (outer - inner).length();
            assert!(
                (span - 2.0 * LATERAL_EXTENT).abs() < 1e-5,
                "span {span} at angle {angle}"
            );
        }
    }

    #[test]
    fn test_vertical_separates_faces() {
        for i in 0..8 {
            let angle = 0.3 + i as f32 * 0.7;
            let top = surface_transform(angle, 0.0, 1.0).transform_point3(Vec3::ZERO);
            let bottom = surface_transform(angle, 0.0, -1.0).transform_point3(Vec3::ZERO);
            let gap = (top - bottom).length();
            assert!(
                (gap - 2.0 * FACE_OFFSET).abs() < 1e-5,
                "face gap {gap} at angle {angle}"
            );
        }
    }

    #[test]
    fn test_points_orbit_center_circle() {
        // Mid-line points sit exactly on the center circle of radius 0.5.
        for i in 0..16 {
            let angle = i as f32 * 0.41;
            let p = surface_point(angle, 0.0);
            let radial = (p.x * p.x + p.y * p.y).sqrt();
            assert!((radial - RING_RADIUS).abs() < 1e-5);
            assert!(p.z.abs() < 1e-5);
        }
    }
}
