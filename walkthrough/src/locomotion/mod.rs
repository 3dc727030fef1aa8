// Select-driven locomotion
//
// While XR is presenting and a controller holds select, the dolly slides along
// that controller's horizontal pointing direction. Every step is checked against
// the navigable surface: a wall probe ahead and a floor probe under the
// destination. A failed check refuses the step; the dolly never leaves the surface.

pub mod locomotion_system;

pub use locomotion_system::{
    LocomotionIntent, LocomotionState, LocomotionSystem, StepOutcome, StepRefusal,
};
