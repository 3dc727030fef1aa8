pub mod scene;
pub use scene::Scene;

pub mod scene_object;
pub use scene_object::SceneObject;

pub mod geometry;
pub use geometry::{Geometry, VertexPosition};

pub mod lines_mesh;

pub mod material;
pub use material::Material;
