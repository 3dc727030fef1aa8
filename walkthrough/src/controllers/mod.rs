pub mod controller;
pub mod controller_tracker;
pub mod controller_visual;

pub use controller::Controller;
pub use controller_tracker::{CONTROLLER_COUNT, ControllerTracker};
pub use controller_visual::{
    ControllerModelFactory, ControllerVisual, ControllerVisualStyle, ProceduralModelFactory,
};
