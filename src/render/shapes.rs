use std::f32::consts::TAU;

use super::mesh::{Mesh, Triangle, Vertex};
use crate::surface::surface_point;

pub const VEHICLE_COLOR: [f32; 4] = [0.05, 0.05, 0.9, 1.0];
pub const OBSTACLE_COLOR: [f32; 4] = [0.03, 0.03, 0.03, 1.0];
pub const STRIP_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Angle subdivisions of the strip tessellation.
pub const STRIP_SEGMENTS: u32 = 96;
/// Lateral subdivisions of the strip tessellation.
pub const STRIP_LANES: u32 = 4;

/// The vehicle body: three roof markers plus a faceted hull, authored in
/// the entity's local frame (x along travel, z up from the surface).
pub fn vehicle() -> Mesh {
    let triangles = [
        Triangle {
            normal: [0.0, 0.0, 1.0],
            coordinates: [
                [-0.117_054_60, 0.001_251_689_5, 0.0],
                [-0.079_654_01, 0.001_251_689_5, 0.0],
                [-0.079_654_01, 0.038_652_28, 0.0],
            ],
        },
        Triangle {
            normal: [0.0, 0.0, 1.0],
            coordinates: [
                [-0.086_133_38, -0.008_509_161, 0.0],
                [-0.113_258_80, -0.008_509_161, 0.0],
                [-0.086_133_38, -0.035_634_58, 0.0],
            ],
        },
        Triangle {
            normal: [0.0, 0.0, 1.0],
            coordinates: [
                [-0.120_772_35, -0.017_377_90, 0.0],
                [-0.140_772_35, -0.017_377_90, 0.0],
                [-0.120_772_35, -0.037_377_90, 0.0],
            ],
        },
        Triangle {
            normal: [0.242_535_62, 0.0, 0.970_142_5],
            coordinates: [[0.03, -0.05, 0.01], [0.07, -0.05, 0.0], [0.07, 0.05, 0.0]],
        },
        Triangle {
            normal: [0.0, 0.099_503_72, 0.995_037_2],
            coordinates: [[0.07, 0.05, 0.0], [0.03, 0.05, 0.0], [0.03, -0.05, 0.01]],
        },
        Triangle {
            normal: [-0.097_590_01, 0.195_180_01, 0.975_900_07],
            coordinates: [
                [-0.07, -0.05, 0.0],
                [0.03, -0.05, 0.01],
                [-0.02, 0.0, -0.005],
            ],
        },
        Triangle {
            normal: [0.099_503_72, 0.0, 0.995_037_2],
            coordinates: [[-0.07, 0.05, 0.0], [-0.07, -0.05, 0.0], [-0.02, 0.0, -0.005]],
        },
        Triangle {
            normal: [0.0, -0.099_503_72, 0.995_037_2],
            coordinates: [[-0.07, 0.05, 0.0], [-0.02, 0.0, -0.005], [0.03, 0.05, 0.0]],
        },
        Triangle {
            normal: [-0.195_180_01, 0.097_590_01, 0.975_900_07],
            coordinates: [[-0.02, 0.0, -0.005], [0.03, -0.05, 0.01], [0.03, 0.05, 0.0]],
        },
    ];
    Mesh::from_triangles(&triangles, VEHICLE_COLOR)
}

/// A single dark wedge sitting just above the surface.
pub fn obstacle() -> Mesh {
    const S: f32 = 0.06;
    let triangles = [Triangle {
        normal: [0.0, 0.0, 1.0],
        coordinates: [[S, S, S], [S, 0.0, S], [0.0, 0.0, S]],
    }];
    Mesh::from_triangles(&triangles, OBSTACLE_COLOR)
}

/// Tessellate the ribbon by sweeping intrinsic coordinates through the
/// surface mapping, one flat-shaded quad per cell. Vertices are duplicated
/// per quad so each cell keeps its own face normal; the index list turns
/// every cell into two triangles.
pub fn strip() -> Mesh {
    let mut vertices = Vec::with_capacity((STRIP_SEGMENTS * STRIP_LANES * 4) as usize);
    let mut indices = Vec::with_capacity((STRIP_SEGMENTS * STRIP_LANES * 6) as usize);

    let angle_step = TAU / STRIP_SEGMENTS as f32;
    let lane_step = 2.0 / STRIP_LANES as f32;

    for seg in 0..STRIP_SEGMENTS {
        let a0 = seg as f32 * angle_step;
        let a1 = a0 + angle_step;
        for lane in 0..STRIP_LANES {
            let l0 = -1.0 + lane as f32 * lane_step;
            let l1 = l0 + lane_step;

            let p00 = surface_point(a0, l0);
            let p10 = surface_point(a1, l0);
            let p11 = surface_point(a1, l1);
            let p01 = surface_point(a0, l1);

            let normal = (p10 - p00).cross(p01 - p00).normalize_or_zero();

            let base = vertices.len() as u16;
            for p in [p00, p10, p11, p01] {
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                    color: STRIP_COLOR,
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
    }

    Mesh {
        vertices,
        indices: Some(indices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_is_nine_triangles() {
        let mesh = vehicle();
        assert_eq!(mesh.vertices.len(), 27);
        assert!(mesh.indices.is_none());
        for vertex in &mesh.vertices {
            assert_eq!(vertex.color, VEHICLE_COLOR);
        }
    }

    #[test]
    fn test_vehicle_normals_are_unit_length() {
        for vertex in &vehicle().vertices {
            let [x, y, z] = vertex.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-5, "normal length {len}");
        }
    }

    #[test]
    fn test_obstacle_is_one_dark_triangle() {
        let mesh = obstacle();
        assert_eq!(mesh.vertices.len(), 3);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.color, OBSTACLE_COLOR);
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_strip_counts() {
        let mesh = strip();
        let cells = (STRIP_SEGMENTS * STRIP_LANES) as usize;
        assert_eq!(mesh.vertices.len(), cells * 4);
        let indices = mesh.indices.as_ref().expect("strip is indexed");
        assert_eq!(indices.len(), cells * 6);
        let max = *indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertices.len());
    }

    #[test]
    fn test_strip_lies_on_the_mapped_surface() {
        let mesh = strip();
        // First quad's first corner is the surface point at (0, -1).
        let expected = surface_point(0.0, -1.0).to_array();
        assert_eq!(mesh.vertices[0].position, expected);
        // Quads cover the full loop: some vertex sits at angle TAU/2.
        let half = surface_point(std::f32::consts::PI, -1.0);
        assert!(mesh
            .vertices
            .iter()
            .any(|v| (glam::Vec3::from_array(v.position) - half).length() < 1e-5));
    }

    #[test]
    fn test_strip_normals_are_unit_length() {
        for vertex in &strip().vertices {
            let [x, y, z] = vertex.normal;
            let len = (x * x + y * y + z * z).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }
}
