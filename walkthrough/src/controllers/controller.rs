use crate::{dolly::Dolly, input_context::Pose};

use super::ControllerVisual;

/// One tracked hand controller.
///
/// `select_pressed` only changes through events routed by the
/// [`ControllerTracker`](super::ControllerTracker): select start/end, and
/// connect/disconnect, which both leave it released.
#[derive(Debug)]
pub struct Controller {
    index: usize,
    pose: Pose,
    select_pressed: bool,
    connected: bool,
    visual: Option<ControllerVisual>,
}

impl Controller {
    pub(crate) fn new(index: usize) -> Self {
        Controller {
            index,
            pose: Pose::identity(),
            select_pressed: false,
            connected: false,
            visual: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Pose relative to the dolly.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn world_pose(&self, dolly: &Dolly) -> Pose {
        dolly.local_to_world(&self.pose)
    }

    pub fn select_pressed(&self) -> bool {
        self.select_pressed
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn visual(&self) -> Option<&ControllerVisual> {
        self.visual.as_ref()
    }

    pub(super) fn on_select_start(&mut self) {
        self.select_pressed = true;
    }

    pub(super) fn on_select_end(&mut self) {
        self.select_pressed = false;
    }

    pub(super) fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub(super) fn connect(&mut self, visual: Option<ControllerVisual>) {
        self.connected = true;
        self.select_pressed = false;
        self.visual = visual;
    }

    /// Runtimes drop controllers without a select end; release it here.
    pub(super) fn disconnect(&mut self) {
        self.connected = false;
        self.select_pressed = false;
        self.visual = None;
    }
}
