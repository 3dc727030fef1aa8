use std::time::Duration;

use cgmath::{InnerSpace, Vector3, vec3};
use engine::locomotion_log;

use crate::{
    config::LocomotionConfig,
    controllers::ControllerTracker,
    dolly::Dolly,
    errors::LocomotionError,
    navigation::{NavigableSurface, NavigationRaycaster},
    session::SessionContext,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocomotionState {
    #[default]
    Idle,
    Moving,
}

/// What the user is asking for this frame. Derived, used once, dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionIntent {
    pub active: bool,
    /// Controller whose pointing direction drives the step.
    pub controller: Option<usize>,
    /// Unit horizontal direction, or zero when the controller points straight up/down.
    pub direction: Vector3<f32>,
    pub elapsed: Duration,
}

impl LocomotionIntent {
    fn inactive(elapsed: Duration) -> Self {
        LocomotionIntent {
            active: false,
            controller: None,
            direction: vec3(0.0, 0.0, 0.0),
            elapsed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepRefusal {
    /// Controller points (nearly) vertically; no horizontal heading.
    NoDirection,
    /// Surface geometry ahead closer than the wall limit.
    Blocked { distance: f32 },
    /// No navigable floor under the destination.
    NoFloor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepOutcome {
    /// Movement is off: not presenting, or select not held.
    Idle,
    Moved {
        from: Vector3<f32>,
        to: Vector3<f32>,
    },
    Refused(StepRefusal),
    /// No navigable surface was loaded; locomotion stays off for the session.
    Disabled,
}

pub struct LocomotionSystem {
    config: LocomotionConfig,
    raycaster: NavigationRaycaster,
    state: LocomotionState,
    disabled: bool,
}

impl LocomotionSystem {
    pub fn new(config: LocomotionConfig, raycaster: NavigationRaycaster) -> Self {
        LocomotionSystem {
            config,
            raycaster,
            state: LocomotionState::Idle,
            disabled: false,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(LocomotionConfig::default(), NavigationRaycaster::default())
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state == LocomotionState::Moving
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn raycaster(&self) -> &NavigationRaycaster {
        &self.raycaster
    }

    /// Work out which controller (if any) is asking to move, and where to.
    ///
    /// With select held on both controllers, controller 0 wins.
    pub fn intent(
        &self,
        elapsed: Duration,
        is_presenting: bool,
        tracker: &ControllerTracker,
        dolly: &Dolly,
    ) -> Result<LocomotionIntent, LocomotionError> {
        if !is_presenting {
            return Ok(LocomotionIntent::inactive(elapsed));
        }
        let Some(controller) = tracker.active_select_controller() else {
            return Ok(LocomotionIntent::inactive(elapsed));
        };

        let world = controller.world_pose(dolly);
        if !world.is_finite() {
            return Err(LocomotionError::InvalidPose {
                index: controller.index(),
            });
        }

        Ok(LocomotionIntent {
            active: true,
            controller: Some(controller.index()),
            direction: horizontal_direction(world.forward()).unwrap_or(vec3(0.0, 0.0, 0.0)),
            elapsed,
        })
    }

    /// Advance one frame. The dolly is only written when a step is accepted.
    pub fn update(
        &mut self,
        elapsed: Duration,
        is_presenting: bool,
        tracker: &ControllerTracker,
        session: &mut SessionContext,
    ) -> Result<StepOutcome, LocomotionError> {
        let (surface, dolly) = session.locomotion_view();
        let result = self.step(elapsed, is_presenting, tracker, surface, dolly);

        let next = match result {
            Ok(StepOutcome::Moved { .. }) => LocomotionState::Moving,
            _ => LocomotionState::Idle,
        };
        if next != self.state {
            locomotion_log!(DEBUG, "locomotion {:?} -> {:?}", self.state, next);
            self.state = next;
        }

        result
    }

    fn step(
        &mut self,
        elapsed: Duration,
        is_presenting: bool,
        tracker: &ControllerTracker,
        surface: Option<&NavigableSurface>,
        dolly: &mut Dolly,
    ) -> Result<StepOutcome, LocomotionError> {
        if self.disabled {
            return Ok(StepOutcome::Disabled);
        }
        let Some(surface) = surface else {
            self.disabled = true;
            locomotion_log!(WARN, "no navigable surface loaded, locomotion disabled");
            return Ok(StepOutcome::Disabled);
        };
        if !self.config.enabled {
            return Ok(StepOutcome::Idle);
        }

        let intent = self.intent(elapsed, is_presenting, tracker, dolly)?;
        if !intent.active {
            return Ok(StepOutcome::Idle);
        }

        let outcome = match self.try_step(surface, dolly, &intent) {
            Ok(to) => {
                let from = dolly.position();
                dolly.set_position(to);
                StepOutcome::Moved { from, to }
            }
            Err(refusal) => {
                locomotion_log!(TRACE, "step refused: {:?}", refusal);
                StepOutcome::Refused(refusal)
            }
        };
        Ok(outcome)
    }

    /// Destination of one step, or why there is none.
    fn try_step(
        &self,
        surface: &NavigableSurface,
        dolly: &Dolly,
        intent: &LocomotionIntent,
    ) -> Result<Vector3<f32>, StepRefusal> {
        if intent.direction.magnitude2() <= f32::EPSILON {
            return Err(StepRefusal::NoDirection);
        }

        let from = dolly.position();
        let step = self.config.speed * intent.elapsed.as_secs_f32();

        // A long frame can cover more ground than the wall limit.
        let clearance = self.config.wall_limit.max(step);
        let body = from + vec3(0.0, self.config.body_height, 0.0);
        if let Some(hit) = self.raycaster.cast(surface, body, intent.direction) {
            if hit.distance < clearance {
                return Err(StepRefusal::Blocked {
                    distance: hit.distance,
                });
            }
        }

        let candidate = from + intent.direction * step;

        self.raycaster
            .cast_down(surface, candidate)
            .map(|floor| floor.point)
            .ok_or(StepRefusal::NoFloor)
    }
}

/// `v` flattened onto the ground plane and normalized.
fn horizontal_direction(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let flat = vec3(v.x, 0.0, v.z);
    if flat.magnitude2() < 1e-6 {
        None
    } else {
        Some(flat.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RaycastConfig,
        controllers::CONTROLLER_COUNT,
        input_context::{ControllerEvent, ControllerInput, InputContext, Pose},
    };
    use cgmath::{Deg, Quaternion, Rad, Rotation3};
    use engine::scene::Scene;

    const EPSILON: f32 = 1e-4;

    fn unit_speed() -> LocomotionSystem {
        LocomotionSystem::new(
            LocomotionConfig {
                speed: 1.0,
                ..LocomotionConfig::default()
            },
            NavigationRaycaster::new(RaycastConfig::default()),
        )
    }

    /// 10 x 10 floor at y = 0 centred on the origin.
    fn session_at(position: Vector3<f32>) -> SessionContext {
        let surface =
            NavigableSurface::flat_rectangle("PROXY", vec3(0.0, 0.0, 0.0), 5.0, 5.0).unwrap();
        SessionContext::new(Scene::new(), Dolly::new(position, Rad(0.0)), Some(surface))
    }

    fn tracker() -> ControllerTracker {
        let mut tracker = ControllerTracker::default();
        tracker.get_controllers(CONTROLLER_COUNT);
        tracker.handle_event(ControllerEvent::Connected { index: 0 });
        tracker.handle_event(ControllerEvent::Connected { index: 1 });
        tracker
    }

    fn aim(tracker: &mut ControllerTracker, index: usize, rotation: Quaternion<f32>) {
        tracker.apply_input(&InputContext {
            is_presenting: true,
            controllers: vec![ControllerInput {
                index,
                pose: Pose::new(vec3(0.0, 1.0, 0.0), rotation),
            }],
            ..Default::default()
        });
    }

    fn press(tracker: &mut ControllerTracker, index: usize) {
        tracker.handle_event(ControllerEvent::SelectStart { index });
    }

    fn release(tracker: &mut ControllerTracker, index: usize) {
        tracker.handle_event(ControllerEvent::SelectEnd { index });
    }

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_idle_never_moves_dolly() {
        let mut locomotion = unit_speed();
        let tracker = tracker();
        let start = vec3(1.0, 0.0, -2.0);
        let mut session = session_at(start);

        for dt in [0.0, 0.016, 1.0, 100.0] {
            let outcome = locomotion
                .update(secs(dt), true, &tracker, &mut session)
                .unwrap();
            assert_eq!(outcome, StepOutcome::Idle);
            assert_eq!(locomotion.state(), LocomotionState::Idle);
            assert_eq!(session.dolly().position(), start);
        }
    }

    #[test]
    fn test_moves_exactly_speed_times_elapsed() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        let outcome = locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();

        assert!(matches!(outcome, StepOutcome::Moved { .. }));
        assert!(locomotion.is_moving());
        let moved = session.dolly().position();
        assert!((moved - vec3(0.0, 0.0, -0.1)).magnitude() < EPSILON);
    }

    #[test]
    fn test_controller_zero_wins_tie() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        // Controller 0 points down -Z, controller 1 down +X.
        aim(&mut tracker, 0, Quaternion::new(1.0, 0.0, 0.0, 0.0));
        aim(&mut tracker, 1, Quaternion::from_angle_y(Deg(-90.0)));
        press(&mut tracker, 1);
        press(&mut tracker, 0);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        let intent = locomotion
            .intent(secs(0.5), true, &tracker, session.dolly())
            .unwrap();
        assert_eq!(intent.controller, Some(0));

        locomotion
            .update(secs(0.5), true, &tracker, &mut session)
            .unwrap();
        let moved = session.dolly().position();
        assert!((moved - vec3(0.0, 0.0, -0.5)).magnitude() < EPSILON);
    }

    #[test]
    fn test_second_controller_drives_alone() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        aim(&mut tracker, 1, Quaternion::from_angle_y(Deg(-90.0)));
        press(&mut tracker, 1);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        locomotion
            .update(secs(0.5), true, &tracker, &mut session)
            .unwrap();
        assert!((session.dolly().position() - vec3(0.5, 0.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_release_returns_to_idle_within_one_frame() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        press(&mut tracker, 1);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();
        assert_eq!(locomotion.state(), LocomotionState::Moving);

        release(&mut tracker, 0);
        release(&mut tracker, 1);
        let before = session.dolly().position();
        let outcome = locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();

        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(locomotion.state(), LocomotionState::Idle);
        assert_eq!(session.dolly().position(), before);
    }

    #[test]
    fn test_edge_of_surface_refuses_step() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        // 0.05 from the far edge; a 0.1 step would leave the floor.
        let start = vec3(0.0, 0.0, -4.95);
        let mut session = session_at(start);

        let outcome = locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();

        assert_eq!(outcome, StepOutcome::Refused(StepRefusal::NoFloor));
        assert_eq!(locomotion.state(), LocomotionState::Idle);
        assert_eq!(session.dolly().position(), start);
    }

    #[test]
    fn test_presentation_ending_stops_movement() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();
        assert!(locomotion.is_moving());

        // Still holding select, but the headset is no longer presenting.
        let held = session.dolly().position();
        for _ in 0..3 {
            let outcome = locomotion
                .update(secs(0.1), false, &tracker, &mut session)
                .unwrap();
            assert_eq!(outcome, StepOutcome::Idle);
            assert!(!locomotion.is_moving());
            assert_eq!(session.dolly().position(), held);
        }

        locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();
        assert!(locomotion.is_moving());
        assert!((session.dolly().position() - vec3(0.0, 0.0, -0.2)).magnitude() < EPSILON);
    }

    #[test]
    fn test_missing_surface_disables_permanently() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        let mut session = SessionContext::new(Scene::new(), Dolly::default(), None);

        for _ in 0..3 {
            let outcome = locomotion
                .update(secs(0.1), true, &tracker, &mut session)
                .unwrap();
            assert_eq!(outcome, StepOutcome::Disabled);
            assert_eq!(locomotion.state(), LocomotionState::Idle);
        }
        assert!(locomotion.is_disabled());
        assert_eq!(session.dolly().position(), vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_wall_ahead_blocks_step() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);

        // Floor plus a wall quad standing at z = -1.
        let vertices = [
            vec3(-5.0, 0.0, -5.0),
            vec3(5.0, 0.0, -5.0),
            vec3(5.0, 0.0, 5.0),
            vec3(-5.0, 0.0, 5.0),
            vec3(-5.0, 0.0, -1.0),
            vec3(5.0, 0.0, -1.0),
            vec3(5.0, 3.0, -1.0),
            vec3(-5.0, 3.0, -1.0),
        ];
        let indices = [[0, 1, 2], [0, 2, 3], [4, 5, 6], [4, 6, 7]];
        let surface = NavigableSurface::from_triangles("PROXY", &vertices, &indices).unwrap();
        let mut session = SessionContext::new(Scene::new(), Dolly::default(), Some(surface));

        let outcome = locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();

        match outcome {
            StepOutcome::Refused(StepRefusal::Blocked { distance }) => {
                assert!((distance - 1.0).abs() < EPSILON)
            }
            other => panic!("expected blocked step, got {:?}", other),
        }
        assert_eq!(session.dolly().position(), vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_long_frame_cannot_pass_through_wall() {
        let mut locomotion = LocomotionSystem::with_default_config();
        let mut tracker = tracker();
        press(&mut tracker, 0);

        // Wall at z = -1.5: beyond the wall limit, but inside a 2 m step.
        let vertices = [
            vec3(-5.0, 0.0, -5.0),
            vec3(5.0, 0.0, -5.0),
            vec3(5.0, 0.0, 5.0),
            vec3(-5.0, 0.0, 5.0),
            vec3(-5.0, 0.0, -1.5),
            vec3(5.0, 0.0, -1.5),
            vec3(5.0, 3.0, -1.5),
            vec3(-5.0, 3.0, -1.5),
        ];
        let indices = [[0, 1, 2], [0, 2, 3], [4, 5, 6], [4, 6, 7]];
        let surface = NavigableSurface::from_triangles("PROXY", &vertices, &indices).unwrap();
        let mut session = SessionContext::new(Scene::new(), Dolly::default(), Some(surface));

        let outcome = locomotion
            .update(secs(1.0), true, &tracker, &mut session)
            .unwrap();

        match outcome {
            StepOutcome::Refused(StepRefusal::Blocked { distance }) => {
                assert!((distance - 1.5).abs() < EPSILON)
            }
            other => panic!("expected blocked step, got {:?}", other),
        }
        assert_eq!(session.dolly().position(), vec3(0.0, 0.0, 0.0));

        // Short frames still approach it.
        let outcome = locomotion
            .update(secs(0.05), true, &tracker, &mut session)
            .unwrap();
        assert!(matches!(outcome, StepOutcome::Moved { .. }));
    }

    #[test]
    fn test_reconnected_controller_does_not_drive() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        tracker.handle_event(ControllerEvent::Disconnected { index: 0 });
        tracker.handle_event(ControllerEvent::Connected { index: 0 });
        let start = vec3(0.0, 0.0, -0.2);
        let mut session = session_at(start);

        let outcome = locomotion
            .update(secs(1.0), true, &tracker, &mut session)
            .unwrap();

        assert_eq!(outcome, StepOutcome::Idle);
        assert!(!locomotion.is_moving());
        assert_eq!(session.dolly().position(), start);
    }

    #[test]
    fn test_step_up_snaps_to_floor_height() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);

        // Lower floor for z in [-1, 1], raised landing at y = 0.3 for z in [-3, -1].
        let vertices = [
            vec3(-1.0, 0.0, -1.0),
            vec3(1.0, 0.0, -1.0),
            vec3(1.0, 0.0, 1.0),
            vec3(-1.0, 0.0, 1.0),
            vec3(-1.0, 0.3, -3.0),
            vec3(1.0, 0.3, -3.0),
            vec3(1.0, 0.3, -1.0),
            vec3(-1.0, 0.3, -1.0),
        ];
        let indices = [[0, 1, 2], [0, 2, 3], [4, 5, 6], [4, 6, 7]];
        let surface = NavigableSurface::from_triangles("PROXY", &vertices, &indices).unwrap();
        let dolly = Dolly::new(vec3(0.0, 0.0, -0.95), Rad(0.0));
        let mut session = SessionContext::new(Scene::new(), dolly, Some(surface));

        locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();
        let moved = session.dolly().position();
        assert!((moved - vec3(0.0, 0.3, -1.05)).magnitude() < EPSILON);
    }

    #[test]
    fn test_vertical_controller_has_no_direction() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        aim(&mut tracker, 0, Quaternion::from_angle_x(Deg(-90.0)));
        press(&mut tracker, 0);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        let outcome = locomotion
            .update(secs(0.1), true, &tracker, &mut session)
            .unwrap();
        assert_eq!(outcome, StepOutcome::Refused(StepRefusal::NoDirection));
        assert_eq!(locomotion.state(), LocomotionState::Idle);
    }

    #[test]
    fn test_direction_follows_dolly_yaw() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        press(&mut tracker, 0);
        let surface =
            NavigableSurface::flat_rectangle("PROXY", vec3(0.0, 0.0, 0.0), 5.0, 5.0).unwrap();
        let dolly = Dolly::new(vec3(0.0, 0.0, 0.0), Deg(90.0).into());
        let mut session = SessionContext::new(Scene::new(), dolly, Some(surface));

        locomotion
            .update(secs(1.0), true, &tracker, &mut session)
            .unwrap();
        assert!((session.dolly().position() - vec3(-1.0, 0.0, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_non_finite_pose_is_an_error_and_keeps_dolly() {
        let mut locomotion = unit_speed();
        let mut tracker = tracker();
        tracker.apply_input(&InputContext {
            is_presenting: true,
            controllers: vec![ControllerInput {
                index: 0,
                pose: Pose::new(vec3(f32::NAN, 0.0, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            }],
            ..Default::default()
        });
        press(&mut tracker, 0);
        let start = vec3(0.5, 0.0, 0.5);
        let mut session = session_at(start);

        let result = locomotion.update(secs(0.1), true, &tracker, &mut session);
        assert!(matches!(
            result,
            Err(LocomotionError::InvalidPose { index: 0 })
        ));
        assert_eq!(locomotion.state(), LocomotionState::Idle);
        assert_eq!(session.dolly().position(), start);
    }

    #[test]
    fn test_disabled_config_never_moves() {
        let mut locomotion = LocomotionSystem::new(
            LocomotionConfig {
                enabled: false,
                ..LocomotionConfig::default()
            },
            NavigationRaycaster::default(),
        );
        let mut tracker = tracker();
        press(&mut tracker, 0);
        let mut session = session_at(vec3(0.0, 0.0, 0.0));

        let outcome = locomotion
            .update(secs(0.5), true, &tracker, &mut session)
            .unwrap();
        assert_eq!(outcome, StepOutcome::Idle);
        assert_eq!(session.dolly().position(), vec3(0.0, 0.0, 0.0));
    }
}
