//! Ball flight animation: Idle -> Animating -> Idle
//!
//! The animator is advanced one tick per display frame by whoever owns
//! the schedule. It has no early exit: once started it always runs the
//! full frame count.

use bevy::math::DVec2;

/// Animation state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AnimatorState {
    #[default]
    Idle,
    Animating {
        target: DVec2,
        /// Per-frame displacement
        step: DVec2,
        /// Frames already applied
        frame: u32,
    },
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Ball advanced by one step
    Moved { position: DVec2, frame: u32 },
    /// Last frame: ball snapped onto the target
    Finished { position: DVec2 },
}

/// Moves the ball toward a target over a fixed number of frames
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    frame_count: u32,
    state: AnimatorState,
}

impl Animator {
    /// A frame count of 0 is treated as 1
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            state: AnimatorState::Idle,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Takes effect on the next shot
    pub fn set_frame_count(&mut self, frame_count: u32) {
        self.frame_count = frame_count.max(1);
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating { .. })
    }

    /// Begin animating from `from` to `target`. Returns false (and changes
    /// nothing) while a previous animation is still running.
    pub fn start(&mut self, from: DVec2, target: DVec2) -> bool {
        if self.is_animating() {
            return false;
        }
        let step = (target - from) / self.frame_count as f64;
        self.state = AnimatorState::Animating {
            target,
            step,
            frame: 0,
        };
        true
    }

    /// Advance one frame, moving `position` in place. Returns None when idle.
    pub fn tick(&mut self, position: &mut DVec2) -> Option<TickOutcome> {
        let AnimatorState::Animating { target, step, frame } = self.state else {
            return None;
        };

        let frame = frame + 1;
        if frame >= self.frame_count {
            // Snap to remove accumulated floating point drift
            *position = target;
            self.state = AnimatorState::Idle;
            return Some(TickOutcome::Finished { position: target });
        }

        *position += step;
        self.state = AnimatorState::Animating { target, step, frame };
        Some(TickOutcome::Moved {
            position: *position,
            frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_exactly_frame_count_ticks() {
        let mut animator = Animator::new(60);
        let mut pos = DVec2::new(50.0, 550.0);
        assert!(animator.start(pos, DVec2::new(170.0, 550.0)));

        let mut ticks = 0;
        loop {
            ticks += 1;
            match animator.tick(&mut pos) {
                Some(TickOutcome::Moved { .. }) => {}
                Some(TickOutcome::Finished { .. }) => break,
                None => panic!("animator went idle without finishing"),
            }
        }
        assert_eq!(ticks, 60);
        assert!(!animator.is_animating());
        assert!(animator.tick(&mut pos).is_none());
    }

    #[test]
    fn test_finishes_exactly_on_target() {
        let mut animator = Animator::new(60);
        let mut pos = DVec2::new(0.1, 0.7);
        let target = DVec2::new(123.456789, -98.7654321);
        animator.start(pos, target);
        while let Some(TickOutcome::Moved { .. }) = animator.tick(&mut pos) {}
        assert_eq!(pos, target);
    }

    #[test]
    fn test_moves_by_even_steps() {
        let mut animator = Animator::new(4);
        let mut pos = DVec2::ZERO;
        animator.start(pos, DVec2::new(40.0, -8.0));
        assert_eq!(
            animator.tick(&mut pos),
            Some(TickOutcome::Moved {
                position: DVec2::new(10.0, -2.0),
                frame: 1
            })
        );
        animator.tick(&mut pos);
        assert_eq!(pos, DVec2::new(20.0, -4.0));
    }

    #[test]
    fn test_start_while_animating_is_rejected() {
        let mut animator = Animator::new(10);
        let mut pos = DVec2::ZERO;
        animator.start(pos, DVec2::new(10.0, 0.0));
        animator.tick(&mut pos);
        let before = animator.state();
        assert!(!animator.start(pos, DVec2::new(-50.0, 0.0)));
        assert_eq!(animator.state(), before);
    }

    #[test]
    fn test_zero_frame_count_is_one() {
        let mut animator = Animator::new(0);
        assert_eq!(animator.frame_count(), 1);
        let mut pos = DVec2::ZERO;
        animator.start(pos, DVec2::new(5.0, 5.0));
        assert_eq!(
            animator.tick(&mut pos),
            Some(TickOutcome::Finished {
                position: DVec2::new(5.0, 5.0)
            })
        );
    }
}
