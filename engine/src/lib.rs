#[macro_use]
pub mod logging;

pub mod render_context;
pub mod scene;

pub use render_context::{RenderContext, Renderer, compute_view_matrix_from_render_context};
