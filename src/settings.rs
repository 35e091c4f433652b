//! Game settings
//!
//! Loads tuning from config/golf_settings.json (missing fields fall back to
//! the defaults in constants). CLI args override file settings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::aim::AimMode;
use crate::clubs::{Club, ClubMultipliers};
use crate::constants::*;
use crate::motion::{MotionSample, PermissionState};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/golf_settings.json";

fn default_activation_margin() -> f64 {
    MOUSE_TOUCH_ACTIVATION_MARGIN
}
fn default_frame_count() -> u32 {
    ANIMATION_FRAMES
}
fn default_distance_scale() -> f64 {
    DISTANCE_SCALE
}
fn default_motion_strength() -> f64 {
    DEFAULT_MOTION_STRENGTH
}
fn default_strength_range() -> (f64, f64) {
    (SIM_STRENGTH_MIN, SIM_STRENGTH_MAX)
}
fn default_deviation_range() -> (f64, f64) {
    (SIM_DEVIATION_MIN, SIM_DEVIATION_MAX)
}
fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}
fn default_canvas_width_fraction() -> f64 {
    CANVAS_WIDTH_FRACTION
}
fn default_canvas_height_fraction() -> f64 {
    CANVAS_HEIGHT_FRACTION
}

/// Recorded motion input, replayed through the permission gate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Samples to deliver once permission is granted (empty = no sensor)
    #[serde(default)]
    pub samples: Vec<MotionSample>,
    /// Answer to the permission prompt (None = no prompt needed)
    #[serde(default)]
    pub permission: Option<PermissionState>,
}

/// Everything configurable about a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct GolfSettings {
    #[serde(default)]
    pub aim_mode: AimMode,
    /// Extra pixels around the ball that still start a drag
    #[serde(default = "default_activation_margin")]
    pub activation_margin: f64,
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,
    /// Strength used when the sensor reports no x acceleration
    #[serde(default = "default_motion_strength")]
    pub default_strength: f64,
    #[serde(default = "default_strength_range")]
    pub strength_range: (f64, f64),
    #[serde(default = "default_deviation_range")]
    pub deviation_range: (f64, f64),
    #[serde(default)]
    pub clubs: ClubMultipliers,
    #[serde(default)]
    pub starting_club: Club,
    /// RNG seed for simulated swings (null = random)
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_canvas_width_fraction")]
    pub canvas_width_fraction: f64,
    #[serde(default = "default_canvas_height_fraction")]
    pub canvas_height_fraction: f64,
    #[serde(default)]
    pub motion: MotionSettings,
}

impl Default for GolfSettings {
    fn default() -> Self {
        Self {
            aim_mode: AimMode::default(),
            activation_margin: default_activation_margin(),
            frame_count: default_frame_count(),
            distance_scale: default_distance_scale(),
            default_strength: default_motion_strength(),
            strength_range: default_strength_range(),
            deviation_range: default_deviation_range(),
            clubs: ClubMultipliers::default(),
            starting_club: Club::default(),
            seed: None,
            window_width: default_window_width(),
            window_height: default_window_height(),
            canvas_width_fraction: default_canvas_width_fraction(),
            canvas_height_fraction: default_canvas_height_fraction(),
            motion: MotionSettings::default(),
        }
    }
}

/// Keep a (min, max) range usable for uniform sampling
fn ordered_range(range: (f64, f64), fallback: (f64, f64)) -> (f64, f64) {
    let (a, b) = range;
    if !a.is_finite() || !b.is_finite() || a == b {
        return fallback;
    }
    if a < b { (a, b) } else { (b, a) }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn fraction_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 && value <= 1.0 { value } else { fallback }
}

impl GolfSettings {
    /// Load settings from a file, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<GolfSettings>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings.validated()
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load settings from the default path
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Clamp values that would break resolution or animation
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        self.frame_count = self.frame_count.max(1);
        if !self.activation_margin.is_finite() || self.activation_margin < 0.0 {
            self.activation_margin = defaults.activation_margin;
        }
        self.distance_scale = positive_or(self.distance_scale, defaults.distance_scale);
        self.default_strength = positive_or(self.default_strength, defaults.default_strength);
        self.strength_range = ordered_range(self.strength_range, defaults.strength_range);
        self.deviation_range = ordered_range(self.deviation_range, defaults.deviation_range);
        self.clubs = self.clubs.validated();
        self.window_width = self.window_width.max(64);
        self.window_height = self.window_height.max(64);
        self.canvas_width_fraction =
            fraction_or(self.canvas_width_fraction, defaults.canvas_width_fraction);
        self.canvas_height_fraction =
            fraction_or(self.canvas_height_fraction, defaults.canvas_height_fraction);
        self
    }

    /// Apply CLI argument overrides.
    /// Returns Err with a message when the args ask for help or are invalid.
    pub fn apply_cli_overrides(&mut self, args: &[String]) -> Result<(), CliError> {
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--aim" | "-a" => {
                    if let Some(val) = args.get(i + 1) {
                        self.aim_mode = AimMode::from_str(val)
                            .ok_or_else(|| CliError::Invalid(format!("Unknown aim mode '{}'", val)))?;
                        i += 1;
                    }
                }
                "--club" | "-c" => {
                    if let Some(val) = args.get(i + 1) {
                        self.starting_club =
                            Club::from_name(val)
                            .ok_or_else(|| CliError::Invalid(format!("Unknown club '{}'", val)))?;
                        i += 1;
                    }
                }
                "--seed" | "-s" => {
                    if let Some(val) = args.get(i + 1) {
                        if let Ok(n) = val.parse() {
                            self.seed = Some(n);
                        }
                        i += 1;
                    }
                }
                "--margin" | "-m" => {
                    if let Some(val) = args.get(i + 1) {
                        match val.as_str() {
                            "pointer" => self.activation_margin = POINTER_ACTIVATION_MARGIN,
                            "mouse" | "touch" => {
                                self.activation_margin = MOUSE_TOUCH_ACTIVATION_MARGIN
                            }
                            other => {
                                if let Ok(n) = other.parse() {
                                    self.activation_margin = n;
                                }
                            }
                        }
                        i += 1;
                    }
                }
                "--frames" | "-f" => {
                    if let Some(val) = args.get(i + 1) {
                        if let Ok(n) = val.parse() {
                            self.frame_count = n;
                        }
                        i += 1;
                    }
                }
                "--help" | "-h" => return Err(CliError::Help(help_text())),
                _ => {}
            }
            i += 1;
        }
        *self = self.clone().validated();
        Ok(())
    }

    /// Load settings (honouring --config PATH) and apply CLI overrides
    pub fn from_args(args: &[String]) -> Result<Self, CliError> {
        let path = config_path_from_args(args);
        let mut settings = Self::load_from(&path);
        settings.apply_cli_overrides(args)?;
        Ok(settings)
    }
}

/// Settings file path, from --config or the default
pub fn config_path_from_args(args: &[String]) -> PathBuf {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

/// Resource holding the path settings were loaded from (for hot reload)
/// Why command-line parsing stopped early
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// `--help` was given. Carries the usage text.
    Help(String),
    /// A flag value could not be used
    Invalid(String),
}

impl CliError {
    /// Process exit status: 0 after help, 2 for bad arguments
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Help(_) => 0,
            CliError::Invalid(_) => 2,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Help(text) | CliError::Invalid(text) => write!(f, "{}", text),
        }
    }
}

impl std::error::Error for CliError {}

#[derive(Resource, Debug, Clone)]
pub struct SettingsPath(pub PathBuf);

fn help_text() -> String {
    format!(
        r#"Minigolf - draw a direction from the ball, pick a club, swing

USAGE:
    cargo run [--bin minigolf] -- [OPTIONS]

OPTIONS:
    -a, --aim MODE        Aim input: gesture or numeric (default: gesture)
    -c, --club NAME       Starting club: driver, iron, hybrid, putter
    -s, --seed N          RNG seed for simulated swings (default: random)
    -m, --margin M        Activation margin: pointer, mouse, touch or pixels
    -f, --frames N        Animation frames per shot (default: {frames})
    --config PATH         Settings file (default: {file})
    -h, --help            Show this help

CONTROLS:
    Drag from the ball    Draw the shot direction (gesture mode)
    0-9 - . Backspace     Type the angle (numeric mode)
    C                     Cycle club
    Space / Enter         Swing
"#,
        frames = ANIMATION_FRAMES,
        file = SETTINGS_FILE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("minigolf")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_empty_json_is_default() {
        let settings: GolfSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, GolfSettings::default());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = GolfSettings::default();
        settings
            .apply_cli_overrides(&args(&["--aim", "numeric", "--club", "putter", "-s", "9", "--margin", "pointer"]))
            .unwrap();
        assert_eq!(settings.aim_mode, AimMode::Numeric);
        assert_eq!(settings.starting_club, Club::Putter);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.activation_margin, POINTER_ACTIVATION_MARGIN);
    }

    #[test]
    fn test_cli_rejects_unknown_club() {
        let mut settings = GolfSettings::default();
        let err = settings.apply_cli_overrides(&args(&["--club", "wedge"])).unwrap_err();
        assert_eq!(err, CliError::Invalid("Unknown club 'wedge'".to_string()));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_help_returns_text() {
        let mut settings = GolfSettings::default();
        let err = settings.apply_cli_overrides(&args(&["--help"])).unwrap_err();
        assert!(matches!(&err, CliError::Help(text) if text.contains("USAGE")));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_validated_fixes_ranges() {
        let settings = GolfSettings {
            frame_count: 0,
            distance_scale: -3.0,
            strength_range: (20.0, 5.0),
            deviation_range: (1.0, 1.0),
            canvas_width_fraction: 2.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.frame_count, 1);
        assert_eq!(settings.distance_scale, DISTANCE_SCALE);
        assert_eq!(settings.strength_range, (5.0, 20.0));
        assert_eq!(settings.deviation_range, (SIM_DEVIATION_MIN, SIM_DEVIATION_MAX));
        assert_eq!(settings.canvas_width_fraction, CANVAS_WIDTH_FRACTION);
    }

    #[test]
    fn test_config_path_from_args() {
        assert_eq!(config_path_from_args(&args(&[])), PathBuf::from(SETTINGS_FILE));
        assert_eq!(
            config_path_from_args(&args(&["--config", "x.json"])),
            PathBuf::from("x.json")
        );
    }

    #[test]
    fn test_missing_file_is_default() {
        let settings = GolfSettings::load_from(Path::new("does/not/exist.json"));
        assert_eq!(settings, GolfSettings::default());
    }
}
