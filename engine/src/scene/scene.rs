pub use crate::scene::scene_object::SceneObject;

/// Flat list of renderable objects handed to the [`Renderer`](crate::Renderer) each frame.
#[derive(Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Objects that will actually be drawn.
    pub fn visible_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|obj| obj.is_visible())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Drop everything after the first `len` objects.
    pub fn truncate_objects(&mut self, len: usize) {
        self.objects.truncate(len);
    }
}
