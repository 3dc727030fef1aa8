use cgmath::{Matrix4, Quaternion, Rad, Rotation3, Vector3, vec3};
use engine::RenderContext;

use crate::input_context::Pose;

/// Eye height of the camera above the dolly origin.
pub const DEFAULT_CAMERA_OFFSET: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.6,
    z: 0.0,
};

/// The rig the camera and controllers are parented to. Moving the dolly moves the viewer.
#[derive(Clone, Debug)]
pub struct Dolly {
    position: Vector3<f32>,
    yaw: Rad<f32>,
    camera_offset: Vector3<f32>,
}

impl Dolly {
    pub fn new(position: Vector3<f32>, yaw: Rad<f32>) -> Self {
        Dolly {
            position,
            yaw,
            camera_offset: DEFAULT_CAMERA_OFFSET,
        }
    }

    pub fn with_camera_offset(mut self, camera_offset: Vector3<f32>) -> Self {
        self.camera_offset = camera_offset;
        self
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(self.yaw)
    }

    pub fn camera_offset(&self) -> Vector3<f32> {
        self.camera_offset
    }

    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation())
    }

    /// Convert a dolly-local pose (as the XR runtime reports controllers) to world space.
    pub fn local_to_world(&self, local: &Pose) -> Pose {
        let rotation = self.rotation();
        Pose {
            position: self.position + rotation * local.position,
            rotation: rotation * local.rotation,
        }
    }

    pub fn render_context(&self, head: &Pose, time: f32) -> RenderContext {
        RenderContext {
            time,
            camera_offset: self.position,
            camera_rotation: self.rotation(),
            head_offset: self.camera_offset + head.position,
            head_rotation: head.rotation,
        }
    }

    pub(crate) fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }
}

impl Default for Dolly {
    fn default() -> Self {
        Dolly::new(vec3(0.0, 0.0, 0.0), Rad(0.0))
    }
}
