use engine::{input_log, scene::SceneObject};

use crate::{
    dolly::Dolly,
    input_context::{ControllerEvent, InputContext},
};

use super::{
    Controller, ControllerModelFactory, ControllerVisual, ControllerVisualStyle,
    ProceduralModelFactory,
};

/// Number of hand controllers the XR runtime exposes.
pub const CONTROLLER_COUNT: usize = 2;

/// Owns the hand controllers and routes XR runtime events to them.
pub struct ControllerTracker {
    controllers: Vec<Controller>,
    model_factory: Box<dyn ControllerModelFactory>,
    style: ControllerVisualStyle,
}

impl ControllerTracker {
    pub fn new(model_factory: Box<dyn ControllerModelFactory>) -> Self {
        ControllerTracker {
            controllers: Vec::with_capacity(CONTROLLER_COUNT),
            model_factory,
            style: ControllerVisualStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ControllerVisualStyle) -> Self {
        self.style = style;
        self
    }

    /// Make sure controllers `0..count` exist and return them.
    ///
    /// Repeated calls hand back the same controllers with their state intact.
    pub fn get_controllers(&mut self, count: usize) -> &[Controller] {
        let count = count.min(CONTROLLER_COUNT);
        while self.controllers.len() < count {
            let index = self.controllers.len();
            self.controllers.push(Controller::new(index));
        }
        &self.controllers[..count]
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn controller(&self, index: usize) -> Option<&Controller> {
        self.controllers.get(index)
    }

    /// Apply one frame of runtime input: events first, in order, then poses.
    pub fn apply_input(&mut self, input: &InputContext) {
        for event in &input.events {
            self.handle_event(*event);
        }
        self.update_poses(input);
    }

    pub fn handle_event(&mut self, event: ControllerEvent) {
        let index = event.index();
        let Some(controller) = self.controllers.get_mut(index) else {
            input_log!(WARN, "ignoring {:?} for unknown controller {}", event, index);
            return;
        };

        match event {
            ControllerEvent::SelectStart { .. } => {
                input_log!(DEBUG, "controller {} select start", index);
                controller.on_select_start();
            }
            ControllerEvent::SelectEnd { .. } => {
                input_log!(DEBUG, "controller {} select end", index);
                controller.on_select_end();
            }
            ControllerEvent::Connected { .. } => {
                let grip = match self.model_factory.create_controller_model(index) {
                    Ok(model) => Some(model),
                    Err(err) => {
                        input_log!(WARN, "controller {} has no grip model: {}", index, err);
                        None
                    }
                };
                controller.connect(Some(ControllerVisual::new(index, &self.style, grip)));
                input_log!(INFO, "controller {} connected", index);
            }
            ControllerEvent::Disconnected { .. } => {
                controller.disconnect();
                input_log!(INFO, "controller {} disconnected", index);
            }
        }
    }

    fn update_poses(&mut self, input: &InputContext) {
        for reported in &input.controllers {
            if let Some(controller) = self.controllers.get_mut(reported.index) {
                controller.set_pose(reported.pose);
            }
        }
    }

    pub fn any_select_pressed(&self) -> bool {
        self.active_select_controller().is_some()
    }

    /// The connected controller holding select with the lowest index.
    pub fn active_select_controller(&self) -> Option<&Controller> {
        self.controllers
            .iter()
            .find(|c| c.is_connected() && c.select_pressed())
    }

    /// Pointer lines and grip models for every connected controller.
    pub fn scene_objects(&self, dolly: &Dolly) -> Vec<SceneObject> {
        self.controllers
            .iter()
            .filter(|c| c.is_connected())
            .filter_map(|c| c.visual().map(|v| v.scene_objects(c, dolly, &self.style)))
            .flatten()
            .collect()
    }
}

impl Default for ControllerTracker {
    fn default() -> Self {
        ControllerTracker::new(Box::new(ProceduralModelFactory))
    }
}
