/// Surface description attached to a [`SceneObject`](super::SceneObject).
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub opacity: f32,
    pub transparent: bool,
    pub visible: bool,
    /// Drawn with its base color only, ignoring scene lighting.
    pub unlit: bool,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_color: [1.0, 1.0, 1.0, 1.0],
            opacity: 1.0,
            transparent: false,
            visible: true,
            unlit: false,
        }
    }

    pub fn with_color(name: impl Into<String>, base_color: [f32; 4]) -> Self {
        Self {
            base_color,
            ..Self::new(name)
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("")
    }
}
