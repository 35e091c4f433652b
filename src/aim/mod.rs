//! Aim module - turns a drawn gesture or typed number into a base angle

mod gesture;
mod numeric;

pub use gesture::*;
pub use numeric::*;

use bevy::math::DVec2;
use serde::{Deserialize, Serialize};

/// Per-shot aim state. Cleared when a swing animation completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AimState {
    pub drawn_angle: Option<f64>,
    pub line_end: Option<DVec2>,
    pub is_drawing: bool,
}

impl AimState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        self.drawn_angle.is_none() && self.line_end.is_none() && !self.is_drawing
    }
}

/// Physical source of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    /// Touch with the platform finger id
    Touch(u64),
    /// Unified pointer events (pen, mouse or touch already merged)
    Pointer,
}

impl std::fmt::Display for PointerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerSource::Mouse => write!(f, "mouse"),
            PointerSource::Touch(id) => write!(f, "touch#{}", id),
            PointerSource::Pointer => write!(f, "pointer"),
        }
    }
}

/// Which aim strategy to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AimMode {
    #[default]
    Gesture,
    Numeric,
}

impl AimMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gesture" | "draw" => Some(AimMode::Gesture),
            "numeric" | "angle" => Some(AimMode::Numeric),
            _ => None,
        }
    }
}

/// Aim capture strategy for the current shot
#[derive(Debug, Clone, PartialEq)]
pub enum AimCapture {
    Gesture(GestureAim),
    Numeric(NumericAim),
}

impl AimCapture {
    pub fn new(mode: AimMode, activation_margin: f64) -> Self {
        match mode {
            AimMode::Gesture => AimCapture::Gesture(GestureAim::new(activation_margin)),
            AimMode::Numeric => AimCapture::Numeric(NumericAim::default()),
        }
    }

    pub fn mode(&self) -> AimMode {
        match self {
            AimCapture::Gesture(_) => AimMode::Gesture,
            AimCapture::Numeric(_) => AimMode::Numeric,
        }
    }

    /// Angle the next swing will start from
    pub fn base_angle(&self) -> Option<f64> {
        match self {
            AimCapture::Gesture(gesture) => gesture.state().drawn_angle,
            AimCapture::Numeric(numeric) => numeric.base_angle(),
        }
    }

    /// End of the drawn line, if one should be rendered
    pub fn line_end(&self) -> Option<DVec2> {
        match self {
            AimCapture::Gesture(gesture) => gesture.state().line_end,
            AimCapture::Numeric(_) => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        match self {
            AimCapture::Gesture(gesture) => gesture.state().is_drawing,
            AimCapture::Numeric(_) => false,
        }
    }

    pub fn pointer_start(&mut self, source: PointerSource, ball: DVec2, ball_radius: f64, point: DVec2) -> bool {
        match self {
            AimCapture::Gesture(gesture) => gesture.start(source, ball, ball_radius, point),
            AimCapture::Numeric(_) => false,
        }
    }

    pub fn pointer_move(&mut self, source: PointerSource, point: DVec2) -> bool {
        match self {
            AimCapture::Gesture(gesture) => gesture.update(source, point),
            AimCapture::Numeric(_) => false,
        }
    }

    pub fn pointer_end(&mut self, source: PointerSource, ball: DVec2, point: DVec2) -> Option<f64> {
        match self {
            AimCapture::Gesture(gesture) => gesture.finish(source, ball, point),
            AimCapture::Numeric(_) => None,
        }
    }

    pub fn numeric(&self) -> Option<&NumericAim> {
        match self {
            AimCapture::Numeric(numeric) => Some(numeric),
            AimCapture::Gesture(_) => None,
        }
    }

    /// Numeric field, when typing is the active strategy
    pub fn numeric_mut(&mut self) -> Option<&mut NumericAim> {
        match self {
            AimCapture::Numeric(numeric) => Some(numeric),
            AimCapture::Gesture(_) => None,
        }
    }

    /// Reset after a completed shot. Typed angles stay in the field.
    pub fn reset(&mut self) {
        if let AimCapture::Gesture(gesture) = self {
            gesture.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_mode_ignores_pointer() {
        let mut aim = AimCapture::new(AimMode::Numeric, 10.0);
        assert!(!aim.pointer_start(PointerSource::Mouse, DVec2::ZERO, 10.0, DVec2::ZERO));
        assert!(aim.base_angle().is_none());
        aim.numeric_mut().unwrap().set_text("30");
        assert_eq!(aim.base_angle(), Some(30.0));
        aim.reset();
        assert_eq!(aim.base_angle(), Some(30.0));
    }

    #[test]
    fn test_gesture_reset_clears_state() {
        let mut aim = AimCapture::new(AimMode::Gesture, 10.0);
        aim.pointer_start(PointerSource::Mouse, DVec2::ZERO, 10.0, DVec2::ZERO);
        aim.pointer_end(PointerSource::Mouse, DVec2::ZERO, DVec2::new(10.0, 0.0));
        assert_eq!(aim.base_angle(), Some(0.0));
        aim.reset();
        assert!(aim.base_angle().is_none());
        assert!(aim.line_end().is_none());
    }

    #[test]
    fn test_aim_mode_parse() {
        assert_eq!(AimMode::from_str("Numeric"), Some(AimMode::Numeric));
        assert_eq!(AimMode::from_str("draw"), Some(AimMode::Gesture));
        assert_eq!(AimMode::from_str("joystick"), None);
    }
}
