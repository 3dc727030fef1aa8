// Headless stand-ins for the XR host and the renderer.
//
// Used by the headless runtime and by tests to drive the frame scheduler
// without a headset or a GPU.

use cgmath::Vector3;
use engine::{RenderContext, Renderer, render_log, scene::Scene};

use crate::frame_scheduler::{
    AnimationLoopHost, CallbackHandle, FrameOutcome, FrameScheduler, XrFrame,
};

/// Animation loop that hands out handles and delivers frames on demand.
#[derive(Default)]
pub struct SimulatedHost {
    next_handle: u64,
    active: Vec<CallbackHandle>,
    cancelled: Vec<CallbackHandle>,
}

impl SimulatedHost {
    pub fn active_handles(&self) -> &[CallbackHandle] {
        &self.active
    }

    pub fn cancelled(&self) -> &[CallbackHandle] {
        &self.cancelled
    }

    /// Deliver one displayed frame to every active registration.
    /// Returns how many of them rendered.
    pub fn pump(
        &self,
        scheduler: &mut FrameScheduler,
        frame: &XrFrame,
        renderer: &mut dyn Renderer,
    ) -> usize {
        let mut rendered = 0;
        for handle in &self.active {
            if let FrameOutcome::Rendered { .. } = scheduler.on_frame(*handle, frame, &mut *renderer) {
                rendered += 1;
            }
        }
        rendered
    }
}

impl AnimationLoopHost for SimulatedHost {
    fn request_animation_loop(&mut self) -> CallbackHandle {
        self.next_handle += 1;
        let handle = CallbackHandle(self.next_handle);
        self.active.push(handle);
        handle
    }

    fn cancel_animation_loop(&mut self, handle: CallbackHandle) {
        self.active.retain(|active| *active != handle);
        self.cancelled.push(handle);
    }
}

#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub object_names: Vec<String>,
    pub eye_position: Vector3<f32>,
}

/// Renderer that remembers what it was asked to draw.
#[derive(Default)]
pub struct RecordingRenderer {
    frames: Vec<RenderedFrame>,
}

impl RecordingRenderer {
    pub fn frames_rendered(&self) -> usize {
        self.frames.len()
    }

    pub fn last(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, context: &RenderContext) {
        let object_names: Vec<String> = scene.visible_objects().map(|o| o.name.clone()).collect();
        render_log!(
            TRACE,
            "frame {}: {} objects",
            self.frames.len(),
            object_names.len()
        );
        self.frames.push(RenderedFrame {
            object_names,
            eye_position: context.eye_position(),
        });
    }
}
