/// 40-byte vertex: position (12), normal (12), color (16).
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // normal
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // color
                wgpu::VertexAttribute {
                    offset: 28,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// A flat-shaded source triangle: one normal shared by all three corners.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub normal: [f32; 3],
    pub coordinates: [[f32; 3]; 3],
}

/// Triangle-soup mesh with an optional index list. Built once at startup
/// and immutable afterwards; vertices are grouped in implicit triples
/// unless `indices` is present.
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Option<Vec<u16>>,
}

impl Mesh {
    /// Interleave flat-shaded triangles into vertex records. Every corner
    /// carries its triangle's normal and the mesh-wide color, in the
    /// coordinate order given.
    pub fn from_triangles(triangles: &[Triangle], color: [f32; 4]) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        for triangle in triangles {
            for corner in &triangle.coordinates {
                vertices.push(Vertex {
                    position: *corner,
                    normal: triangle.normal,
                    color,
                });
            }
        }
        Self {
            vertices,
            indices: None,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_triangles() -> Vec<Triangle> {
        vec![
            Triangle {
                normal: [0.0, 0.0, 1.0],
                coordinates: [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            },
            Triangle {
                normal: [0.0, 1.0, 0.0],
                coordinates: [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
            },
        ]
    }

    #[test]
    fn test_three_records_per_triangle() {
        let color = [0.2, 0.4, 0.6, 1.0];
        let mesh = Mesh::from_triangles(&sample_triangles(), color);
        assert_eq!(mesh.vertices.len(), 6);
        for (i, vertex) in mesh.vertices.iter().enumerate() {
            assert_eq!(vertex.normal, sample_triangles()[i / 3].normal);
            assert_eq!(vertex.color, color);
        }
    }

    #[test]
    fn test_corner_order_is_preserved() {
        let mesh = Mesh::from_triangles(&sample_triangles(), [1.0; 4]);
        for (i, triangle) in sample_triangles().iter().enumerate() {
            for (j, corner) in triangle.coordinates.iter().enumerate() {
                assert_eq!(mesh.vertices[i * 3 + j].position, *corner);
            }
        }
    }

    #[test]
    fn test_interleaved_layout_is_ten_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 40);

        let color = [0.1, 0.2, 0.3, 0.4];
        let mesh = Mesh::from_triangles(&sample_triangles()[..1], color);
        let floats: &[f32] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(floats.len(), 30);
        // per vertex: [x, y, z, nx, ny, nz, r, g, b, a]
        assert_eq!(&floats[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&floats[3..6], &[0.0, 0.0, 1.0]);
        assert_eq!(&floats[6..10], &color);
        assert_eq!(&floats[10..13], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_attribute_offsets_match_layout() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 40);
        assert_eq!(desc.attributes[0].offset, 0);
        assert_eq!(desc.attributes[1].offset, 12);
        assert_eq!(desc.attributes[2].offset, 28);
    }
}
