//! Drawn-line aiming: drag from the ball to set the shot direction

use bevy::math::DVec2;

use super::{AimState, PointerSource};

/// Angle in degrees from the ball to a pointer position.
///
/// Canvas y grows downward, so dy is inverted to make "up" positive.
/// Result lies in (-180, 180].
pub fn angle_from_drag(ball: DVec2, pointer: DVec2) -> f64 {
    let dx = pointer.x - ball.x;
    let dy = ball.y - pointer.y;
    dy.atan2(dx).to_degrees()
}

/// Gesture capture for one shot
#[derive(Debug, Clone, PartialEq)]
pub struct GestureAim {
    state: AimState,
    /// Extra pixels around the ball that still start a drag
    activation_margin: f64,
    /// Source that owns the active session
    owner: Option<PointerSource>,
}

impl GestureAim {
    pub fn new(activation_margin: f64) -> Self {
        Self {
            state: AimState::default(),
            activation_margin,
            owner: None,
        }
    }

    pub fn state(&self) -> &AimState {
        &self.state
    }

    pub fn activation_margin(&self) -> f64 {
        self.activation_margin
    }

    pub fn set_activation_margin(&mut self, margin: f64) {
        self.activation_margin = margin;
    }

    /// Whether a contact point is close enough to the ball to begin drawing
    pub fn within_activation(&self, ball: DVec2, ball_radius: f64, point: DVec2) -> bool {
        ball.distance(point) < ball_radius + self.activation_margin
    }

    /// Begin a session. Returns false when the contact is too far from the
    /// ball or a session from any source is already active.
    pub fn start(&mut self, source: PointerSource, ball: DVec2, ball_radius: f64, point: DVec2) -> bool {
        if self.state.is_drawing {
            return false;
        }
        if !self.within_activation(ball, ball_radius, point) {
            return false;
        }
        self.state.is_drawing = true;
        self.state.drawn_angle = None;
        self.state.line_end = Some(point);
        self.owner = Some(source);
        true
    }

    /// Track the pointer. Returns true when the line end changed.
    pub fn update(&mut self, source: PointerSource, point: DVec2) -> bool {
        if !self.owns(source) {
            return false;
        }
        self.state.line_end = Some(point);
        true
    }

    /// Finish the session and compute the base angle
    pub fn finish(&mut self, source: PointerSource, ball: DVec2, point: DVec2) -> Option<f64> {
        if !self.owns(source) {
            return None;
        }
        let angle = angle_from_drag(ball, point);
        self.state.is_drawing = false;
        self.state.line_end = Some(point);
        self.state.drawn_angle = Some(angle);
        self.owner = None;
        Some(angle)
    }

    /// Drop everything drawn for the current shot
    pub fn reset(&mut self) {
        self.state.clear();
        self.owner = None;
    }

    fn owns(&self, source: PointerSource) -> bool {
        self.state.is_drawing && self.owner == Some(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALL: DVec2 = DVec2::new(100.0, 100.0);

    #[test]
    fn test_diagonal_drag_is_45_degrees() {
        let angle = angle_from_drag(BALL, DVec2::new(150.0, 50.0));
        assert!((angle - 45.0).abs() < 1e-9, "got {}", angle);
    }

    #[test]
    fn test_drag_down_is_negative() {
        let angle = angle_from_drag(BALL, DVec2::new(100.0, 160.0));
        assert!((angle + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_left_is_180() {
        let angle = angle_from_drag(BALL, DVec2::new(40.0, 100.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_outside_margin_is_ignored() {
        let mut aim = GestureAim::new(20.0);
        // 30px away: radius 10 + margin 20 is not strictly greater
        let started = aim.start(PointerSource::Pointer, BALL, 10.0, DVec2::new(130.0, 100.0));
        assert!(!started);
        assert!(!aim.state().is_drawing);
        assert!(aim.state().line_end.is_none());
    }

    #[test]
    fn test_start_inside_margin() {
        let mut aim = GestureAim::new(20.0);
        assert!(aim.start(PointerSource::Pointer, BALL, 10.0, DVec2::new(125.0, 100.0)));
        assert!(aim.state().is_drawing);
    }

    #[test]
    fn test_full_session_sets_angle() {
        let mut aim = GestureAim::new(10.0);
        assert!(aim.start(PointerSource::Mouse, BALL, 10.0, BALL));
        assert!(aim.update(PointerSource::Mouse, DVec2::new(120.0, 80.0)));
        let angle = aim.finish(PointerSource::Mouse, BALL, DVec2::new(150.0, 50.0));
        assert_eq!(angle, Some(aim.state().drawn_angle.unwrap()));
        assert!((angle.unwrap() - 45.0).abs() < 1e-9);
        assert!(!aim.state().is_drawing);
        assert_eq!(aim.state().line_end, Some(DVec2::new(150.0, 50.0)));
    }

    #[test]
    fn test_second_source_cannot_hijack_session() {
        let mut aim = GestureAim::new(10.0);
        assert!(aim.start(PointerSource::Touch(0), BALL, 10.0, BALL));
        // Emulated mouse events from the same gesture
        assert!(!aim.start(PointerSource::Mouse, BALL, 10.0, BALL));
        assert!(!aim.update(PointerSource::Mouse, DVec2::new(0.0, 0.0)));
        assert_eq!(aim.finish(PointerSource::Mouse, BALL, DVec2::new(0.0, 0.0)), None);
        assert!(aim.state().is_drawing);

        let angle = aim.finish(PointerSource::Touch(0), BALL, DVec2::new(160.0, 100.0));
        assert_eq!(angle, Some(0.0));
    }

    #[test]
    fn test_move_without_session_is_ignored() {
        let mut aim = GestureAim::new(10.0);
        assert!(!aim.update(PointerSource::Mouse, DVec2::new(1.0, 1.0)));
        assert!(aim.state().line_end.is_none());
    }

    #[test]
    fn test_restart_clears_previous_angle() {
        let mut aim = GestureAim::new(10.0);
        aim.start(PointerSource::Mouse, BALL, 10.0, BALL);
        aim.finish(PointerSource::Mouse, BALL, DVec2::new(150.0, 50.0));
        assert!(aim.state().drawn_angle.is_some());

        aim.start(PointerSource::Mouse, BALL, 10.0, BALL);
        assert!(aim.state().drawn_angle.is_none());
    }
}
