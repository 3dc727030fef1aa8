pub mod config;
pub mod controllers;
pub mod dolly;
pub mod environment;
pub mod errors;
pub mod frame_scheduler;
pub mod headless;
pub mod input_context;
pub mod locomotion;
pub mod navigation;
pub mod session;
pub mod time;

pub use config::WalkthroughConfig;
pub use dolly::Dolly;
pub use frame_scheduler::{
    AnimationLoopHost, CallbackHandle, FrameOutcome, FrameScheduler, FrameSkip, XrFrame,
};
pub use session::SessionContext;
