use cgmath::vec3;

use crate::scene::{Geometry, VertexPosition};

pub fn create(vertices: Vec<VertexPosition>) -> Geometry {
    Geometry::Lines { vertices }
}

/// Unit segment from the origin along -Z; scale z to set its length.
pub fn unit_pointer() -> Geometry {
    create(vec![
        VertexPosition {
            position: vec3(0.0, 0.0, 0.0),
        },
        VertexPosition {
            position: vec3(0.0, 0.0, -1.0),
        },
    ])
}
