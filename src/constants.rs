//! Tunable constants for minigolf
//!
//! All gameplay values are defined here for easy tweaking.

use bevy::prelude::*;
use image::Rgba;

// =============================================================================
// COURSE LAYOUT
// =============================================================================

pub const BALL_RADIUS: f64 = 10.0;
pub const HOLE_RADIUS: f64 = 15.0;
pub const BALL_START_INSET_X: f64 = 50.0; // From the left edge
pub const BALL_START_INSET_Y: f64 = 50.0; // From the bottom edge
pub const HOLE_INSET_X: f64 = 100.0; // From the right edge
pub const HOLE_INSET_Y: f64 = 100.0; // From the top edge

// =============================================================================
// WINDOW / CANVAS
// =============================================================================

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;
pub const CANVAS_WIDTH_FRACTION: f64 = 0.9;
pub const CANVAS_HEIGHT_FRACTION: f64 = 0.6;
pub const CANVAS_TOP_MARGIN: f32 = 24.0;

// =============================================================================
// AIM CAPTURE
// =============================================================================

pub const POINTER_ACTIVATION_MARGIN: f64 = 20.0; // Unified pointer events
pub const MOUSE_TOUCH_ACTIVATION_MARGIN: f64 = 10.0; // Separate mouse + touch events
pub const AIM_LINE_WIDTH: f32 = 2.0;

// =============================================================================
// SWING RESOLUTION
// =============================================================================

pub const ANIMATION_FRAMES: u32 = 60;
pub const DISTANCE_SCALE: f64 = 10.0; // Pixels per unit of strength
pub const DEFAULT_MOTION_STRENGTH: f64 = 10.0; // Used when the sensor reports 0/NaN
pub const SIM_STRENGTH_MIN: f64 = 5.0;
pub const SIM_STRENGTH_MAX: f64 = 20.0;
pub const SIM_DEVIATION_MIN: f64 = -5.0; // Degrees
pub const SIM_DEVIATION_MAX: f64 = 5.0;

// =============================================================================
// CLUB MULTIPLIERS
// =============================================================================

pub const DRIVER_MULTIPLIER: f64 = 1.2;
pub const IRON_MULTIPLIER: f64 = 0.9;
pub const HYBRID_MULTIPLIER: f64 = 1.0;
pub const PUTTER_MULTIPLIER: f64 = 0.5;

// =============================================================================
// COLORS
// =============================================================================

pub const GRASS_COLOR: Rgba<u8> = Rgba([0x4c, 0xaf, 0x50, 255]); // #4caf50
pub const HOLE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const BALL_FILL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BALL_OUTLINE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const AIM_LINE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

pub const UI_BACKGROUND: Color = Color::srgb(0.12, 0.14, 0.12);
pub const BUTTON_ENABLED: Color = Color::srgb(0.18, 0.45, 0.2);
pub const BUTTON_HOVERED: Color = Color::srgb(0.24, 0.56, 0.26);
pub const BUTTON_DISABLED: Color = Color::srgb(0.3, 0.3, 0.3);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.9);
pub const TEXT_MUTED: Color = Color::srgb(0.6, 0.6, 0.58);

// =============================================================================
// PROMPTS
// =============================================================================

pub const PROMPT_DRAW: &str = "Draw your shot direction from the ball";
pub const PROMPT_ENTER_ANGLE: &str = "Type an angle in degrees, then swing";
pub const PROMPT_SWING: &str = "Swing now!";
pub const PROMPT_IN_FLIGHT: &str = "Ball in motion...";
pub const NOTICE_MISSING_AIM: &str = "Please draw your shot direction first!";
pub const NOTICE_MISSING_ANGLE: &str = "Please enter a shot angle first!";
