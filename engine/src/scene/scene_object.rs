use std::rc::Rc;

use cgmath::{Matrix4, SquareMatrix};

use crate::scene::{Geometry, Material};

#[derive(Clone)]
pub struct SceneObject {
    pub name: String,
    pub material: Material,
    pub geometry: Rc<Geometry>,
    pub transform: Matrix4<f32>,
    pub depth_write: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, material: Material, geometry: Geometry) -> SceneObject {
        SceneObject {
            name: name.into(),
            material,
            geometry: Rc::new(geometry),
            transform: Matrix4::identity(),
            depth_write: true,
        }
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn get_transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn set_depth_write(&mut self, depth_write: bool) {
        self.depth_write = depth_write;
    }

    pub fn is_visible(&self) -> bool {
        self.material.visible
    }
}
