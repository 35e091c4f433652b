//! Assertion checking for scenario expectations

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GolfEvent;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
}

impl CapturedEvent {
    pub fn from_golf_event(frame: u64, event: &GolfEvent) -> Self {
        Self {
            frame,
            event_type: event.name().to_string(),
        }
    }
}

/// Check if captured events match expected sequence (in order, gaps allowed)
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..]
            .iter()
            .enumerate()
            .find(|(_, cap)| cap.event_type == exp.event);

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min {
                    if cap.frame < min {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                            expected: format!("frame >= {}", min),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                if let Some(max) = exp.frame_max {
                    if cap.frame > max {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                            expected: format!("frame <= {}", max),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                captured_idx += offset + 1;
            }
            None => {
                return Err(AssertionError {
                    message: format!("Event #{} '{}' not found", i + 1, exp.event),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Game state visible to assertions
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub ball_x: f64,
    pub ball_y: f64,
    pub swing_in_progress: bool,
    pub swing_enabled: bool,
    pub aim_angle: Option<f64>,
    pub aim_drawing: bool,
    pub aim_line: bool,
    pub notice: bool,
    pub club: String,
    pub prompt: String,
    pub motion_permission: String,
    pub shot_distance: Option<f64>,
    pub shot_final_angle: Option<f64>,
    pub shot_strength: Option<f64>,
    pub shot_motion: Option<bool>,
}

impl WorldState {
    /// One-line description of the course for failure reports
    pub fn summary(&self) -> String {
        let angle = match self.aim_angle {
            Some(angle) => format!("{:.2}", angle),
            None => "none".to_string(),
        };
        let mut line = format!(
            "ball ({:.2}, {:.2}), club {}, aim {}{}",
            self.ball_x,
            self.ball_y,
            self.club,
            angle,
            if self.aim_drawing { " (drawing)" } else { "" }
        );
        if self.swing_in_progress {
            line.push_str(", swinging");
        }
        if self.notice {
            line.push_str(", notice shown");
        }
        if let Some(distance) = self.shot_distance {
            line.push_str(&format!(", last shot {:.2}", distance));
        }
        line
    }
}

/// A state value a check can compare against
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Num(f64),
    Bool(bool),
    Text(String),
    Absent,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Absent => write!(f, "none"),
        }
    }
}

fn optional(value: Option<f64>) -> Value {
    value.map(Value::Num).unwrap_or(Value::Absent)
}

fn parse_value(raw: &str) -> Value {
    let raw = raw.trim().trim_matches('"');
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "none" => Value::Absent,
        _ => raw
            .parse::<f64>()
            .map(Value::Num)
            .unwrap_or_else(|_| Value::Text(raw.to_string())),
    }
}

impl WorldState {
    fn lookup(&self, path: &str) -> Option<Value> {
        let value = match path {
            "ball.x" => Value::Num(self.ball_x),
            "ball.y" => Value::Num(self.ball_y),
            "swing_in_progress" => Value::Bool(self.swing_in_progress),
            "swing_enabled" => Value::Bool(self.swing_enabled),
            "aim.angle" => optional(self.aim_angle),
            "aim.drawing" => Value::Bool(self.aim_drawing),
            "aim.line" => Value::Bool(self.aim_line),
            "aim.clear" => Value::Bool(self.aim_angle.is_none() && !self.aim_line && !self.aim_drawing),
            "notice" => Value::Bool(self.notice),
            "club" => Value::Text(self.club.clone()),
            "prompt" => Value::Text(self.prompt.clone()),
            "motion.permission" => Value::Text(self.motion_permission.clone()),
            "shot.distance" => optional(self.shot_distance),
            "shot.final_angle" => optional(self.shot_final_angle),
            "shot.strength" => optional(self.shot_strength),
            "shot.motion" => self.shot_motion.map(Value::Bool).unwrap_or(Value::Absent),
            _ => return None,
        };
        Some(value)
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

fn compare(actual: &Value, operator: &str, expected: &Value, tolerance: f64) -> Option<bool> {
    let equal = match (actual, expected) {
        (Value::Num(a), Value::Num(b)) => (a - b).abs() <= tolerance,
        _ => actual == expected,
    };
    match operator {
        "=" => Some(equal),
        "!=" => Some(!equal),
        _ => {
            let (Value::Num(a), Value::Num(b)) = (actual, expected) else {
                return None;
            };
            Some(match operator {
                ">" => a > b,
                "<" => a < b,
                ">=" => a >= b,
                "<=" => a <= b,
                _ => return None,
            })
        }
    }
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_raw) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'path = value' or 'path > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = state.lookup(path).ok_or_else(|| AssertionError {
            message: format!("Unknown state path '{}'", path),
            expected: "ball.x, ball.y, swing_in_progress, swing_enabled, aim.*, notice, club, prompt, motion.permission, shot.*"
                .to_string(),
            actual: path.to_string(),
        })?;
        let expected = parse_value(expected_raw);

        match compare(&actual, operator, &expected, assertion.tolerance) {
            Some(true) => {}
            Some(false) => {
                return Err(AssertionError {
                    message: format!("Check failed after frame {}: {}", assertion.after_frame, check),
                    expected: format!("{} {}", operator, expected),
                    actual: actual.to_string(),
                });
            }
            None => {
                return Err(AssertionError {
                    message: format!("Operator '{}' needs numbers: {}", operator, check),
                    expected: "numeric value".to_string(),
                    actual: actual.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_frame: 1,
            checks: checks.iter().map(|c| c.to_string()).collect(),
            tolerance: 1e-6,
        }
    }

    fn state() -> WorldState {
        WorldState {
            ball_x: 170.0,
            ball_y: 550.0,
            club: "driver".to_string(),
            motion_permission: "unavailable".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_numeric_and_bool_checks() {
        let checks = assertion(&[
            "ball.x = 170.0000001",
            "ball.y >= 549",
            "swing_in_progress = false",
            "aim.angle = none",
            "aim.clear = true",
            "club = driver",
        ]);
        assert!(check_state(&checks, &state()).is_ok());
    }

    #[test]
    fn test_summary_lists_course_state() {
        let mut world = state();
        assert_eq!(world.summary(), "ball (170.00, 550.00), club driver, aim none");

        world.aim_angle = Some(45.0);
        world.notice = true;
        world.shot_distance = Some(120.0);
        assert_eq!(
            world.summary(),
            "ball (170.00, 550.00), club driver, aim 45.00, notice shown, last shot 120.00"
        );
    }

    #[test]
    fn test_failed_check_reports_values() {
        let err = check_state(&assertion(&["ball.x = 100"]), &state()).unwrap_err();
        assert_eq!(err.actual, "170");
    }

    #[test]
    fn test_unknown_path_is_error() {
        assert!(check_state(&assertion(&["hole.x = 3"]), &state()).is_err());
    }

    #[test]
    fn test_ordering_needs_numbers() {
        assert!(check_state(&assertion(&["club > 3"]), &state()).is_err());
    }

    #[test]
    fn test_sequence_order() {
        let captured = vec![
            CapturedEvent {
                frame: 1,
                event_type: "AimStarted".to_string(),
            },
            CapturedEvent {
                frame: 3,
                event_type: "AimCompleted".to_string(),
            },
            CapturedEvent {
                frame: 4,
                event_type: "SwingStarted".to_string(),
            },
        ];
        let expected = |event: &str, max: Option<u64>| ExpectedEvent {
            event: event.to_string(),
            frame_min: None,
            frame_max: max,
        };

        assert!(check_sequence(&[expected("AimStarted", None), expected("SwingStarted", Some(4))], &captured).is_ok());
        assert!(check_sequence(&[expected("SwingStarted", None), expected("AimStarted", None)], &captured).is_err());
        assert!(check_sequence(&[expected("SwingStarted", Some(3))], &captured).is_err());
    }
}
