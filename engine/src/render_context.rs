use cgmath::{Matrix4, Quaternion, SquareMatrix, Vector3};

use crate::scene::Scene;

/// Camera placement for one frame.
///
/// The camera hangs off a movable rig: `camera_offset`/`camera_rotation` place
/// the rig in the world, `head_offset`/`head_rotation` place the eye relative
/// to the rig.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    pub time: f32,
    pub camera_offset: Vector3<f32>,
    pub camera_rotation: Quaternion<f32>,
    pub head_offset: Vector3<f32>,
    pub head_rotation: Quaternion<f32>,
}

impl RenderContext {
    pub fn camera_world_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.camera_offset)
            * Matrix4::from(self.camera_rotation)
            * Matrix4::from_translation(self.head_offset)
            * Matrix4::from(self.head_rotation)
    }

    pub fn eye_position(&self) -> Vector3<f32> {
        self.camera_offset + self.camera_rotation * self.head_offset
    }
}

pub fn compute_view_matrix_from_render_context(context: &RenderContext) -> Matrix4<f32> {
    context
        .camera_world_transform()
        .invert()
        .unwrap_or_else(Matrix4::identity)
}

/// Draws a scene from a camera. Implemented by the host's graphics backend.
pub trait Renderer {
    fn render(&mut self, scene: &Scene, context: &RenderContext);
}
