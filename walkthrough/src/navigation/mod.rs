pub mod navigable_surface;
pub mod raycaster;
mod util;

pub use navigable_surface::NavigableSurface;
pub use raycaster::{NavigationRaycaster, RayHit};
