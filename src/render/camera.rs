use glam::{Mat4, Vec3};
use std::f64::consts::TAU;

/// Radius of the camera's orbit around the origin.
const ORBIT_RADIUS: f32 = 3.0;
/// Simulation ticks per radian of orbital motion.
const ORBIT_RATE: f64 = 300.0;
/// Fixed eye height above the strip plane.
const EYE_HEIGHT: f32 = 1.0;

const FOV_Y_DEG: f32 = 24.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 100.0;

/// Orbit eye position as a function of elapsed ticks. The phase is wrapped
/// in f64 before narrowing so long sessions keep full precision.
pub fn orbit_eye(ticks: f64) -> Vec3 {
    let phase = (ticks / ORBIT_RATE).rem_euclid(TAU) as f32;
    Vec3::new(
        ORBIT_RADIUS * phase.sin(),
        ORBIT_RADIUS * phase.cos(),
        EYE_HEIGHT,
    )
}

/// Combined perspective and look-at transform for one frame. The projection
/// uses a fixed square aspect; pair it with a square viewport.
pub fn view_proj(ticks: f64) -> Mat4 {
    let view = Mat4::look_at_rh(orbit_eye(ticks), Vec3::ZERO, Vec3::Z);
    let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), 1.0, Z_NEAR, Z_FAR);
    proj * view
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_eye_traces_orbit_circle() {
        for ticks in [0.0, 150.0, 299.0, 4321.5] {
            let eye = orbit_eye(ticks);
            let radial = (eye.x * eye.x + eye.y * eye.y).sqrt();
            assert!((radial - ORBIT_RADIUS).abs() < 1e-4, "radius {radial}");
            assert_eq!(eye.z, EYE_HEIGHT);
        }
    }

    #[test]
    fn test_orbit_wraps_after_full_revolution() {
        let a = orbit_eye(10.0);
        let b = orbit_eye(10.0 + ORBIT_RATE * TAU);
        assert!((a - b).length() < 1e-4);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        for ticks in [0.0, 77.0, 500.0] {
            let clip = view_proj(ticks) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            assert!(clip.w > 0.0);
            assert!((clip.x / clip.w).abs() < 1e-5);
            assert!((clip.y / clip.w).abs() < 1e-5);
        }
    }

    #[test]
    fn test_view_proj_is_deterministic() {
        let a = view_proj(123.456);
        let b = view_proj(123.456);
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }
}
