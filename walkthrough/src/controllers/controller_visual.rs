use cgmath::{Matrix4, Vector3, vec3};
use engine::scene::{Geometry, Material, SceneObject, lines_mesh};

use crate::{dolly::Dolly, errors::VisualError};

use super::Controller;

#[derive(Clone, Copy, Debug)]
pub struct ControllerVisualStyle {
    pub pointer_color: [f32; 4],
    /// Pointer length while select is held. Idle pointers collapse to zero length.
    pub pointer_length: f32,
}

impl Default for ControllerVisualStyle {
    fn default() -> Self {
        ControllerVisualStyle {
            pointer_color: [1.0, 1.0, 1.0, 1.0],
            pointer_length: 5.0,
        }
    }
}

/// Produces the grip model shown in the user's hand.
pub trait ControllerModelFactory {
    fn create_controller_model(&self, index: usize) -> Result<SceneObject, VisualError>;
}

/// Small box per hand, built in code so it can never fail to load.
#[derive(Default)]
pub struct ProceduralModelFactory;

impl ControllerModelFactory for ProceduralModelFactory {
    fn create_controller_model(&self, index: usize) -> Result<SceneObject, VisualError> {
        let color = if index == 0 {
            [0.9, 0.3, 0.3, 1.0]
        } else {
            [0.3, 0.9, 0.3, 1.0]
        };
        Ok(SceneObject::new(
            format!("controller_grip_{}", index),
            Material::with_color("ControllerGrip", color),
            grip_box(vec3(0.03, 0.03, 0.1)),
        ))
    }
}

fn grip_box(half: Vector3<f32>) -> Geometry {
    let positions = vec![
        vec3(-half.x, -half.y, -half.z),
        vec3(half.x, -half.y, -half.z),
        vec3(half.x, half.y, -half.z),
        vec3(-half.x, half.y, -half.z),
        vec3(-half.x, -half.y, half.z),
        vec3(half.x, -half.y, half.z),
        vec3(half.x, half.y, half.z),
        vec3(-half.x, half.y, half.z),
    ];
    let indices = vec![
        0, 1, 2, 0, 2, 3, // back
        4, 6, 5, 4, 7, 6, // front
        0, 4, 5, 0, 5, 1, // bottom
        3, 2, 6, 3, 6, 7, // top
        0, 3, 7, 0, 7, 4, // left
        1, 5, 6, 1, 6, 2, // right
    ];
    Geometry::Triangles { positions, indices }
}

/// Feedback geometry owned by one controller: a pointer line and, when it
/// loaded, a grip model.
#[derive(Clone)]
pub struct ControllerVisual {
    pointer: SceneObject,
    grip: Option<SceneObject>,
}

impl ControllerVisual {
    pub fn new(index: usize, style: &ControllerVisualStyle, grip: Option<SceneObject>) -> Self {
        let pointer = SceneObject::new(
            format!("controller_pointer_{}", index),
            Material::with_color("ControllerPointer", style.pointer_color),
            lines_mesh::unit_pointer(),
        );
        ControllerVisual { pointer, grip }
    }

    pub fn has_grip_model(&self) -> bool {
        self.grip.is_some()
    }

    /// World-space objects for this frame.
    pub fn scene_objects(
        &self,
        controller: &Controller,
        dolly: &Dolly,
        style: &ControllerVisualStyle,
    ) -> Vec<SceneObject> {
        let world = controller.world_pose(dolly);
        let base = Matrix4::from_translation(world.position) * Matrix4::from(world.rotation);

        let length = if controller.select_pressed() {
            style.pointer_length
        } else {
            0.0
        };

        let mut pointer = self.pointer.clone();
        pointer.set_transform(base * Matrix4::from_nonuniform_scale(1.0, 1.0, length));
        pointer.set_depth_write(false);

        let mut objects = vec![pointer];
        if let Some(grip) = &self.grip {
            let mut grip = grip.clone();
            grip.set_transform(base);
            objects.push(grip);
        }
        objects
    }
}

impl std::fmt::Debug for ControllerVisual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerVisual")
            .field("pointer", &self.pointer.name)
            .field("grip", &self.grip.as_ref().map(|g| g.name.as_str()))
            .finish()
    }
}
