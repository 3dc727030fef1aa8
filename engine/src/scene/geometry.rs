use cgmath::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct VertexPosition {
    pub position: Vector3<f32>,
}

/// CPU-side geometry. Uploading to the GPU is the renderer's business.
#[derive(Debug, Clone)]
pub enum Geometry {
    Triangles {
        positions: Vec<Vector3<f32>>,
        indices: Vec<u32>,
    },
    Lines {
        vertices: Vec<VertexPosition>,
    },
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Triangles { positions, .. } => positions.len(),
            Geometry::Lines { vertices } => vertices.len(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self {
            Geometry::Triangles { indices, .. } => indices.len() / 3,
            Geometry::Lines { .. } => 0,
        }
    }
}
