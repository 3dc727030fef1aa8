use engine::scene::Scene;

use crate::{dolly::Dolly, navigation::NavigableSurface};

/// Scene, dolly and navigable surface for one walkthrough session.
///
/// Built once after the environment has loaded and handed to the
/// [`FrameScheduler`](crate::FrameScheduler). Only locomotion writes the dolly;
/// the surface never changes.
pub struct SessionContext {
    scene: Scene,
    dolly: Dolly,
    navigable_surface: Option<NavigableSurface>,
}

impl SessionContext {
    pub fn new(scene: Scene, dolly: Dolly, navigable_surface: Option<NavigableSurface>) -> Self {
        SessionContext {
            scene,
            dolly,
            navigable_surface,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn dolly(&self) -> &Dolly {
        &self.dolly
    }

    pub fn navigable_surface(&self) -> Option<&NavigableSurface> {
        self.navigable_surface.as_ref()
    }

    /// Split borrow for the locomotion step: read the surface, write the dolly.
    pub(crate) fn locomotion_view(&mut self) -> (Option<&NavigableSurface>, &mut Dolly) {
        (self.navigable_surface.as_ref(), &mut self.dolly)
    }
}
