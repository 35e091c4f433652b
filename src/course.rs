//! Course layout: the ball and the hole on a canvas-sized playfield
//!
//! Coordinates are canvas-local with the origin at the top-left corner
//! and y growing downward.

use bevy::math::DVec2;

use crate::constants::*;

/// The ball. Owned by the animator while a swing is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: DVec2,
    pub radius: f64,
}

/// The hole. Render target only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub position: DVec2,
    pub radius: f64,
}

/// Playfield dimensions plus the objects on it
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub width: f64,
    pub height: f64,
    pub ball: Ball,
    pub hole: Hole,
}

impl Course {
    /// Lay out a course for a canvas of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ball: Ball {
                position: DVec2::new(BALL_START_INSET_X, height - BALL_START_INSET_Y),
                radius: BALL_RADIUS,
            },
            hole: Hole {
                position: DVec2::new(width - HOLE_INSET_X, HOLE_INSET_Y),
                radius: HOLE_RADIUS,
            },
        }
    }

    /// Canvas size derived from a window size and the configured fractions
    pub fn for_window(window_width: f64, window_height: f64, width_fraction: f64, height_fraction: f64) -> Self {
        Self::new(
            (window_width * width_fraction).floor(),
            (window_height * height_fraction).floor(),
        )
    }

    /// Whether a canvas-local point lies on the playfield
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.y >= 0.0 && point.x <= self.width && point.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_canvas() {
        let course = Course::new(800.0, 600.0);
        assert_eq!(course.ball.position, DVec2::new(50.0, 550.0));
        assert_eq!(course.hole.position, DVec2::new(700.0, 100.0));
        assert_eq!(course.ball.radius, BALL_RADIUS);
        assert_eq!(course.hole.radius, HOLE_RADIUS);
    }

    #[test]
    fn test_for_window_uses_fractions() {
        let course = Course::for_window(1000.0, 1000.0, 0.9, 0.6);
        assert_eq!(course.width, 900.0);
        assert_eq!(course.height, 600.0);
    }
}
