//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::aim::AimMode;
use crate::clubs::Club;
use crate::settings::MotionSettings;

/// Complete scenario from a TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: ScenarioSetup,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: ScenarioExpectations,
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

/// Course and session configuration
#[derive(Debug, Deserialize)]
pub struct ScenarioSetup {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub aim: AimMode,
    #[serde(default)]
    pub club: Club,
    /// Fixed simulated strength. When absent, a seeded random sampler is used.
    pub strength: Option<f64>,
    #[serde(default)]
    pub deviation: f64,
    pub seed: Option<u64>,
    pub margin: Option<f64>,
    pub frames: Option<u32>,
    #[serde(default)]
    pub motion: MotionSettings,
}

impl Default for ScenarioSetup {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            aim: AimMode::default(),
            club: Club::default(),
            strength: None,
            deviation: 0.0,
            seed: None,
            margin: None,
            frames: None,
            motion: MotionSettings::default(),
        }
    }
}

fn default_source() -> String {
    "mouse".to_string()
}

fn default_count() -> u32 {
    1
}

/// One scripted step. Input steps take one frame each; `advance` idles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "default_source")]
        source: String,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default = "default_source")]
        source: String,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "default_source")]
        source: String,
    },
    TypeAngle {
        text: String,
    },
    Backspace {
        #[serde(default = "default_count")]
        count: u32,
    },
    Swing,
    CycleClub,
    SelectClub {
        club: Club,
    },
    Dismiss,
    Advance {
        frames: u32,
    },
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// State assertions at given frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

fn default_tolerance() -> f64 {
    1e-6
}

/// Checks evaluated after a frame
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
    /// Slack for numeric equality
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

/// Parse scenario text
pub fn parse_scenario(content: &str) -> Result<ScenarioDefinition, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ScenarioDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_scenario(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::PermissionState;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Driver"
[setup]
club = "putter"
strength = 10.0

[[steps]]
action = "pointer_down"
x = 50.0
y = 550.0

[[steps]]
action = "swing"

[[steps]]
action = "advance"
frames = 60

[[expect.state]]
after_frame = 62
checks = ["ball.x = 110"]
"#;
        let def = parse_scenario(toml).unwrap();
        assert_eq!(def.name, "Driver");
        assert_eq!(def.setup.club, Club::Putter);
        assert_eq!(def.setup.width, 800.0);
        assert_eq!(
            def.steps[0],
            Step::PointerDown {
                x: 50.0,
                y: 550.0,
                source: "mouse".to_string()
            }
        );
        assert_eq!(def.steps[1], Step::Swing);
        assert_eq!(def.steps[2], Step::Advance { frames: 60 });
        assert_eq!(def.expect.state[0].after_frame, 62);
    }

    #[test]
    fn test_parse_motion_and_numeric() {
        let toml = r#"
name = "Motion"
[setup]
aim = "numeric"
[setup.motion]
permission = "granted"
[[setup.motion.samples]]
acceleration_x = -12.0
acceleration_y = 2.0
"#;
        let def = parse_scenario(toml).unwrap();
        assert_eq!(def.setup.aim, AimMode::Numeric);
        assert_eq!(def.setup.motion.permission, Some(PermissionState::Granted));
        assert_eq!(def.setup.motion.samples.len(), 1);
        assert!(def.steps.is_empty());
    }

    #[test]
    fn test_unknown_action_is_error() {
        let toml = r#"
name = "Bad"
[[steps]]
action = "teleport"
"#;
        assert!(parse_scenario(toml).is_err());
    }
}
