use std::time::Duration;

use engine::{Renderer, frame_log, scene::Scene};

use crate::{
    controllers::{CONTROLLER_COUNT, ControllerTracker},
    dolly::Dolly,
    input_context::InputContext,
    locomotion::{LocomotionState, LocomotionSystem, StepOutcome},
    session::SessionContext,
    time::{FrameClock, Time},
};

/// Token for one animation-loop registration with the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CallbackHandle(pub u64);

/// The host's continuous per-frame loop (the XR compositor's frame pump).
///
/// After `request_animation_loop` the host calls
/// [`FrameScheduler::on_frame`] once per displayed frame with the handle it
/// returned, until `cancel_animation_loop` is called with that handle.
pub trait AnimationLoopHost {
    fn request_animation_loop(&mut self) -> CallbackHandle;
    fn cancel_animation_loop(&mut self, handle: CallbackHandle);
}

/// One displayed frame as delivered by the host.
#[derive(Clone, Debug, Default)]
pub struct XrFrame {
    /// Strictly increasing per displayed frame.
    pub frame_number: u64,
    /// Host timestamp; only differences between frames matter.
    pub timestamp: Duration,
    pub input: InputContext,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSkip {
    NotRegistered,
    StaleHandle,
    /// This frame number was already updated and rendered.
    AlreadyRendered,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Rendered {
        state: LocomotionState,
        /// True when locomotion reported an error this frame.
        faulted: bool,
    },
    Skipped(FrameSkip),
}

/// Drives one update + render per displayed frame.
pub struct FrameScheduler {
    session: SessionContext,
    tracker: ControllerTracker,
    locomotion: LocomotionSystem,
    clock: FrameClock,
    registration: Option<CallbackHandle>,
    last_frame: Option<u64>,
    last_time: Time,
    /// Environment objects followed by this frame's controller visuals.
    frame_scene: Scene,
    environment_len: usize,
    fault_count: u64,
}

impl FrameScheduler {
    pub fn new(
        session: SessionContext,
        mut tracker: ControllerTracker,
        locomotion: LocomotionSystem,
    ) -> Self {
        tracker.get_controllers(CONTROLLER_COUNT);
        let frame_scene = session.scene().clone();
        let environment_len = frame_scene.object_count();
        FrameScheduler {
            session,
            tracker,
            locomotion,
            clock: FrameClock::new(),
            registration: None,
            last_frame: None,
            last_time: Time::default(),
            frame_scene,
            environment_len,
            fault_count: 0,
        }
    }

    /// Register with the host's animation loop. Call when presentation starts.
    ///
    /// Registering again while registered returns the existing handle without
    /// asking the host for a second callback.
    pub fn register(&mut self, host: &mut dyn AnimationLoopHost) -> CallbackHandle {
        if let Some(handle) = self.registration {
            frame_log!(DEBUG, "animation loop already registered as {:?}", handle);
            return handle;
        }

        let handle = host.request_animation_loop();
        self.registration = Some(handle);
        // A new presentation numbers its frames from scratch.
        self.clock.reset();
        self.last_frame = None;
        frame_log!(INFO, "animation loop registered as {:?}", handle);
        handle
    }

    /// Remove the registration. Call when presentation ends. Returns false if
    /// there was nothing to remove.
    pub fn deregister(&mut self, host: &mut dyn AnimationLoopHost) -> bool {
        match self.registration.take() {
            Some(handle) => {
                host.cancel_animation_loop(handle);
                frame_log!(INFO, "animation loop {:?} cancelled", handle);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// The per-frame callback body: advance locomotion, then render.
    ///
    /// Locomotion errors are logged and counted; the frame still renders with
    /// the dolly where it last was valid.
    pub fn on_frame(
        &mut self,
        handle: CallbackHandle,
        frame: &XrFrame,
        renderer: &mut dyn Renderer,
    ) -> FrameOutcome {
        match self.registration {
            None => return FrameOutcome::Skipped(FrameSkip::NotRegistered),
            Some(active) if active != handle => {
                return FrameOutcome::Skipped(FrameSkip::StaleHandle);
            }
            Some(_) => {}
        }
        if self.last_frame.is_some_and(|last| frame.frame_number <= last) {
            frame_log!(
                DEBUG,
                "frame {} already rendered, skipping",
                frame.frame_number
            );
            return FrameOutcome::Skipped(FrameSkip::AlreadyRendered);
        }
        self.last_frame = Some(frame.frame_number);

        let time = self.clock.tick(frame.timestamp);
        self.tracker.apply_input(&frame.input);

        let faulted = match self.locomotion.update(
            time.elapsed,
            frame.input.is_presenting,
            &self.tracker,
            &mut self.session,
        ) {
            Ok(StepOutcome::Moved { from, to }) => {
                frame_log!(TRACE, "dolly {:?} -> {:?}", from, to);
                false
            }
            Ok(_) => false,
            Err(err) => {
                self.fault_count += 1;
                frame_log!(
                    ERROR,
                    "locomotion failed on frame {}: {}",
                    frame.frame_number,
                    err
                );
                true
            }
        };

        self.render(&frame.input, &time, renderer);
        self.last_time = time;

        FrameOutcome::Rendered {
            state: self.locomotion.state(),
            faulted,
        }
    }

    fn render(&mut self, input: &InputContext, time: &Time, renderer: &mut dyn Renderer) {
        let dolly = self.session.dolly();

        self.frame_scene.truncate_objects(self.environment_len);
        for object in self.tracker.scene_objects(dolly) {
            self.frame_scene.add_object(object);
        }

        let context = dolly.render_context(&input.head.pose, time.total.as_secs_f32());
        renderer.render(&self.frame_scene, &context);
    }

    /// Read-only movement signal for UI or haptics.
    pub fn is_moving(&self) -> bool {
        self.locomotion.is_moving()
    }

    pub fn dolly(&self) -> &Dolly {
        self.session.dolly()
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn tracker(&self) -> &ControllerTracker {
        &self.tracker
    }

    pub fn locomotion(&self) -> &LocomotionSystem {
        &self.locomotion
    }

    pub fn last_time(&self) -> &Time {
        &self.last_time
    }

    pub fn fault_count(&self) -> u64 {
        self.fault_count
    }
}
