//! Motion sample sources

use std::collections::VecDeque;

use super::{MotionSample, PermissionState};

/// Anything that can deliver device acceleration samples
pub trait MotionSource: Send + Sync {
    /// Whether the platform needs explicit consent before subscribing
    fn requires_permission(&self) -> bool;

    /// Whether the platform has a sensor at all
    fn is_available(&self) -> bool;

    /// Ask for consent. May answer `Pending` and settle later.
    fn request_permission(&mut self) -> PermissionState;

    /// Check on an earlier request that answered `Pending`
    fn poll_permission(&mut self) -> PermissionState;

    /// Samples received since the last poll, oldest first
    fn poll_samples(&mut self) -> Vec<MotionSample>;
}

/// Platform without a motion sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMotionSensor;

impl MotionSource for NoMotionSensor {
    fn requires_permission(&self) -> bool {
        false
    }

    fn is_available(&self) -> bool {
        false
    }

    fn request_permission(&mut self) -> PermissionState {
        PermissionState::Unavailable
    }

    fn poll_permission(&mut self) -> PermissionState {
        PermissionState::Unavailable
    }

    fn poll_samples(&mut self) -> Vec<MotionSample> {
        Vec::new()
    }
}

/// Pre-recorded samples behind an optional permission prompt
#[derive(Debug, Clone, Default)]
pub struct ScriptedMotion {
    samples: VecDeque<MotionSample>,
    requires_permission: bool,
    outcome: PermissionState,
    pending_polls: u32,
}

impl ScriptedMotion {
    /// Source that needs no consent and delivers the given samples
    pub fn new(samples: Vec<MotionSample>) -> Self {
        Self {
            samples: samples.into(),
            requires_permission: false,
            outcome: PermissionState::Granted,
            pending_polls: 0,
        }
    }

    /// Require consent, answered with `outcome`
    pub fn with_permission(mut self, outcome: PermissionState) -> Self {
        self.requires_permission = true;
        self.outcome = outcome;
        self
    }

    /// Keep the answer pending for this many polls after the request
    pub fn answer_after(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    /// Queue another sample, as if the device fired an event
    pub fn push(&mut self, sample: MotionSample) {
        self.samples.push_back(sample);
    }
}

impl MotionSource for ScriptedMotion {
    fn requires_permission(&self) -> bool {
        self.requires_permission
    }

    fn is_available(&self) -> bool {
        true
    }

    fn request_permission(&mut self) -> PermissionState {
        if self.pending_polls == 0 {
            self.outcome
        } else {
            PermissionState::Pending
        }
    }

    fn poll_permission(&mut self) -> PermissionState {
        self.pending_polls = self.pending_polls.saturating_sub(1);
        self.request_permission()
    }

    fn poll_samples(&mut self) -> Vec<MotionSample> {
        self.samples.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_denial() {
        let mut source = ScriptedMotion::new(vec![]).with_permission(PermissionState::Denied);
        assert!(source.requires_permission());
        assert_eq!(source.request_permission(), PermissionState::Denied);
    }

    #[test]
    fn test_scripted_drains_once() {
        let mut source = ScriptedMotion::new(vec![MotionSample::new(1.0, 2.0)]);
        assert_eq!(source.poll_samples().len(), 1);
        assert!(source.poll_samples().is_empty());
        source.push(MotionSample::new(3.0, 0.0));
        assert_eq!(source.poll_samples(), vec![MotionSample::new(3.0, 0.0)]);
    }
}
