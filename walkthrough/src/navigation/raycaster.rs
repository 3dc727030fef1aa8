use cgmath::{InnerSpace, Vector3, vec3};
use engine::nav_log;
use rapier3d::parry::query::Ray;

use crate::{config::RaycastConfig, dolly::Dolly};

use super::{
    NavigableSurface,
    util::{vec_to_npoint, vec_to_nvec},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vector3<f32>,
    pub distance: f32,
}

/// Ray queries against the navigable surface only. No other geometry is ever hit-tested.
#[derive(Clone, Debug, Default)]
pub struct NavigationRaycaster {
    config: RaycastConfig,
}

impl NavigationRaycaster {
    pub fn new(config: RaycastConfig) -> Self {
        NavigationRaycaster { config }
    }

    pub fn config(&self) -> &RaycastConfig {
        &self.config
    }

    /// Nearest hit along `direction` within the configured range.
    pub fn cast(
        &self,
        surface: &NavigableSurface,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
    ) -> Option<RayHit> {
        if direction.magnitude2() <= f32::EPSILON {
            return None;
        }
        let direction = direction.normalize();

        let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));
        let collider = surface.collider();
        let distance =
            collider
                .shape()
                .cast_ray(collider.position(), &ray, self.config.max_range, true)?;

        let hit = RayHit {
            point: origin + direction * distance,
            distance,
        };
        nav_log!(TRACE, "ray hit {:?} at distance {}", hit.point, distance);
        Some(hit)
    }

    /// Floor directly under `point`, probing from `floor_probe_height` above it.
    pub fn cast_down(&self, surface: &NavigableSurface, point: Vector3<f32>) -> Option<RayHit> {
        let origin = point + vec3(0.0, self.config.floor_probe_height, 0.0);
        self.cast(surface, origin, vec3(0.0, -1.0, 0.0))
    }

    /// Floor under the dolly, if it is standing over the navigable surface.
    pub fn cast_from_dolly(
        &self,
        dolly: &Dolly,
        surface: &NavigableSurface,
    ) -> Option<Vector3<f32>> {
        self.cast_down(surface, dolly.position()).map(|hit| hit.point)
    }
}
