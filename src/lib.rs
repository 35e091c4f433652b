//! Minigolf - a mini-golf swing simulator built with Bevy
//!
//! Aim by drawing a line from the ball (or typing an angle), pick a club,
//! swing, and watch the ball travel to where strength and deviation send it.
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod settings;
pub mod simulation;
pub mod testing;

// Game logic modules
pub mod aim;
pub mod clubs;
pub mod course;
pub mod game;
pub mod motion;
pub mod swing;

// Window front end
pub mod input;
pub mod render;
pub mod ui;

// Re-export commonly used types for convenience
pub use aim::{AimCapture, AimMode, AimState, GestureAim, NumericAim, PointerSource, angle_from_drag};
pub use clubs::{Club, ClubMultipliers};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use course::{Ball, Course, Hole};
pub use events::{BusEvent, EventBus, EventLogConfig, GolfEvent, RejectReason};
pub use game::{GolfGame, GolfInput, GolfPlugin, GolfSystems, Notice, RedrawRequest, SwingError};
pub use motion::{MotionGate, MotionSample, MotionSource, NoMotionSensor, PermissionState, ScriptedMotion};
pub use settings::{CliError, GolfSettings, SETTINGS_FILE};
pub use swing::{
    Animator, FixedSampler, RandomSampler, SampleOrigin, ShotResolution, SwingSample, SwingSampler,
    TickOutcome, resolve_shot,
};
