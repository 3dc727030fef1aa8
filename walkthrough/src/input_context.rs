use cgmath::{InnerSpace, Quaternion, Vector3, vec3};

/// Position + orientation. Controller poses are local to the dolly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    pub fn identity() -> Self {
        Pose {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Pose { position, rotation }
    }

    /// Pointing direction (-Z).
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, -1.0)
    }

    pub fn is_finite(&self) -> bool {
        let p = self.position;
        let q = self.rotation;
        p.x.is_finite()
            && p.y.is_finite()
            && p.z.is_finite()
            && q.s.is_finite()
            && q.v.x.is_finite()
            && q.v.y.is_finite()
            && q.v.z.is_finite()
            && q.magnitude2() > f32::EPSILON
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Head {
    pub pose: Pose,
}

/// Discrete controller events reported by the XR runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    Connected { index: usize },
    Disconnected { index: usize },
    SelectStart { index: usize },
    SelectEnd { index: usize },
}

impl ControllerEvent {
    pub fn index(&self) -> usize {
        match *self {
            ControllerEvent::Connected { index }
            | ControllerEvent::Disconnected { index }
            | ControllerEvent::SelectStart { index }
            | ControllerEvent::SelectEnd { index } => index,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ControllerInput {
    pub index: usize,
    pub pose: Pose,
}

/// Everything the XR runtime tells us about one displayed frame.
#[derive(Clone, Debug, Default)]
pub struct InputContext {
    pub is_presenting: bool,
    pub head: Head,
    pub controllers: Vec<ControllerInput>,
    /// Events since the previous frame, in arrival order.
    pub events: Vec<ControllerEvent>,
}

impl InputContext {
    pub fn presenting() -> Self {
        InputContext {
            is_presenting: true,
            ..Default::default()
        }
    }

    pub fn controller_pose(&self, index: usize) -> Option<Pose> {
        self.controllers
            .iter()
            .find(|c| c.index == index)
            .map(|c| c.pose)
    }
}
