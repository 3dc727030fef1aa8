// Headless Runtime - drives the walkthrough core without a headset
//
// A simulated XR host pumps frames at a fixed interval, the chosen controllers
// hold select the whole time, and a recording renderer stands in for the GPU.
// Useful for checking locomotion end to end from the command line.

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use cgmath::{vec3, Deg, Quaternion, Rad, Rotation3};
use clap::Parser;
use tracing::info;

use walkthrough::{
    controllers::ControllerTracker,
    environment::{self, LoadedEnvironment},
    headless::{RecordingRenderer, SimulatedHost},
    input_context::{ControllerEvent, ControllerInput, InputContext, Pose},
    locomotion::LocomotionSystem,
    navigation::{NavigableSurface, NavigationRaycaster},
    Dolly, FrameScheduler, WalkthroughConfig, XrFrame,
};

#[derive(Parser)]
#[command(name = "headless_runtime")]
#[command(about = "Walk through an environment with simulated controllers")]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value = "90")]
    frames: u64,

    /// Milliseconds between frames
    #[arg(long, default_value = "11")]
    frame_interval_ms: u64,

    /// JSON config file with locomotion and raycast settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// GLB environment to load; a flat floor is used when omitted
    #[arg(short, long)]
    environment: Option<PathBuf>,

    /// Controllers holding select (e.g. --select 0 --select 1)
    #[arg(short, long, default_value = "0")]
    select: Vec<usize>,

    /// Controller yaw in degrees, counter-clockwise from -Z
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    controller_yaw: f32,

    /// Half-size of the generated flat floor
    #[arg(long, default_value = "10.0")]
    floor_size: f32,
}

fn load_environment(args: &Args) -> anyhow::Result<LoadedEnvironment> {
    match &args.environment {
        Some(path) => environment::load_glb_file(path)
            .with_context(|| format!("loading environment {}", path.display())),
        None => {
            let floor = NavigableSurface::flat_rectangle(
                "Floor_PROXY",
                vec3(0.0, 0.0, 0.0),
                args.floor_size,
                args.floor_size,
            )?;
            Ok(LoadedEnvironment {
                scene: engine::scene::Scene::new(),
                navigable_surface: Some(floor),
            })
        }
    }
}

fn frame_input(frame_number: u64, args: &Args) -> InputContext {
    let rotation = Quaternion::from_angle_y(Deg(args.controller_yaw));
    let controllers = (0..2)
        .map(|index| {
            let side = if index == 0 { -0.2 } else { 0.2 };
            ControllerInput {
                index,
                pose: Pose::new(vec3(side, 1.2, -0.3), rotation),
            }
        })
        .collect();

    let mut events = Vec::new();
    if frame_number == 0 {
        events.push(ControllerEvent::Connected { index: 0 });
        events.push(ControllerEvent::Connected { index: 1 });
        for index in &args.select {
            events.push(ControllerEvent::SelectStart { index: *index });
        }
    }

    InputContext {
        is_presenting: true,
        controllers,
        events,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    engine::logging::init_logging_with_default("WALKTHROUGH_LOG", "info");

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => WalkthroughConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WalkthroughConfig::default(),
    };
    info!("config: {:?}", config);

    let session = load_environment(&args)?.into_session(Dolly::new(vec3(0.0, 0.0, 0.0), Rad(0.0)));
    let locomotion = LocomotionSystem::new(
        config.locomotion.clone(),
        NavigationRaycaster::new(config.raycast.clone()),
    );
    let mut scheduler = FrameScheduler::new(session, ControllerTracker::default(), locomotion);

    let mut host = SimulatedHost::default();
    let mut renderer = RecordingRenderer::default();
    scheduler.register(&mut host);

    let interval = Duration::from_millis(args.frame_interval_ms);
    for frame_number in 0..args.frames {
        let frame = XrFrame {
            frame_number,
            timestamp: interval.mul_f64(frame_number as f64),
            input: frame_input(frame_number, &args),
        };
        host.pump(&mut scheduler, &frame, &mut renderer);
    }

    scheduler.deregister(&mut host);

    let dolly = scheduler.dolly();
    info!(
        "rendered {} frames, dolly at {:?}, moving: {}, locomotion faults: {}",
        renderer.frames_rendered(),
        dolly.position(),
        scheduler.is_moving(),
        scheduler.fault_count()
    );
    if let Some(last) = renderer.last() {
        info!("final eye position {:?}", last.eye_position);
    }

    Ok(())
}
