use cgmath::{Vector3, vec3};
use rapier3d::prelude::{Collider, ColliderBuilder};

use crate::errors::NavigationError;

use super::util::vec_to_npoint;

/// Walkable floor geometry. Never drawn; only hit-tested.
///
/// Immutable once built. Vertices are in world space.
pub struct NavigableSurface {
    name: String,
    collider: Collider,
    min_bounds: Vector3<f32>,
    max_bounds: Vector3<f32>,
    triangle_count: usize,
}

impl NavigableSurface {
    pub fn from_triangles(
        name: impl Into<String>,
        vertices: &[Vector3<f32>],
        indices: &[[u32; 3]],
    ) -> Result<Self, NavigationError> {
        let name = name.into();
        if vertices.is_empty() || indices.is_empty() {
            return Err(NavigationError::EmptySurface(name));
        }

        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertices.len())
        {
            return Err(NavigationError::IndexOutOfRange {
                name,
                index,
                vertex_count: vertices.len(),
            });
        }

        let mut min_bounds = vec3(f32::MAX, f32::MAX, f32::MAX);
        let mut max_bounds = vec3(f32::MIN, f32::MIN, f32::MIN);
        for v in vertices {
            min_bounds.x = min_bounds.x.min(v.x);
            min_bounds.y = min_bounds.y.min(v.y);
            min_bounds.z = min_bounds.z.min(v.z);
            max_bounds.x = max_bounds.x.max(v.x);
            max_bounds.y = max_bounds.y.max(v.y);
            max_bounds.z = max_bounds.z.max(v.z);
        }

        let points = vertices.iter().map(|v| vec_to_npoint(*v)).collect();
        let collider = ColliderBuilder::trimesh(points, indices.to_vec()).build();

        Ok(NavigableSurface {
            name,
            collider,
            min_bounds,
            max_bounds,
            triangle_count: indices.len(),
        })
    }

    /// Axis-aligned rectangle on the plane y = `center.y`.
    pub fn flat_rectangle(
        name: impl Into<String>,
        center: Vector3<f32>,
        half_width: f32,
        half_depth: f32,
    ) -> Result<Self, NavigationError> {
        let vertices = [
            center + vec3(-half_width, 0.0, -half_depth),
            center + vec3(half_width, 0.0, -half_depth),
            center + vec3(half_width, 0.0, half_depth),
            center + vec3(-half_width, 0.0, half_depth),
        ];
        Self::from_triangles(name, &vertices, &[[0, 1, 2], [0, 2, 3]])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn bounds(&self) -> (Vector3<f32>, Vector3<f32>) {
        (self.min_bounds, self.max_bounds)
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min_bounds + self.max_bounds) * 0.5
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }
}

impl std::fmt::Debug for NavigableSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigableSurface")
            .field("name", &self.name)
            .field("triangles", &self.triangle_count)
            .field("min", &self.min_bounds)
            .field("max", &self.max_bounds)
            .finish()
    }
}
