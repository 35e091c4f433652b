//! GolfGame - the single owner of per-session game state

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::aim::{AimCapture, AimMode, PointerSource};
use crate::clubs::{Club, ClubMultipliers};
use crate::constants::*;
use crate::course::Course;
use crate::events::{EventBus, GolfEvent, RejectReason};
use crate::motion::{MotionGate, MotionSource};
use crate::settings::GolfSettings;
use crate::swing::{
    Animator, SampleOrigin, ShotResolution, SwingSampler, TickOutcome, resolve_shot, swing_sample,
};

/// Why a swing could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingError {
    /// No drawn or typed angle yet
    MissingAim,
    /// A previous shot is still animating
    InProgress,
}

impl std::fmt::Display for SwingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwingError::MissingAim => write!(f, "no shot angle has been set"),
            SwingError::InProgress => write!(f, "a swing is already in progress"),
        }
    }
}

impl std::error::Error for SwingError {}

impl From<SwingError> for RejectReason {
    fn from(err: SwingError) -> Self {
        match err {
            SwingError::MissingAim => RejectReason::MissingAim,
            SwingError::InProgress => RejectReason::InProgress,
        }
    }
}

/// Course, aim, animation, motion and club state for one player
#[derive(Resource, Debug, Clone)]
pub struct GolfGame {
    course: Course,
    aim: AimCapture,
    animator: Animator,
    motion: MotionGate,
    club: Club,
    clubs: ClubMultipliers,
    distance_scale: f64,
    default_strength: f64,
    last_shot: Option<ShotResolution>,
}

impl GolfGame {
    pub fn new(course: Course, settings: &GolfSettings) -> Self {
        Self {
            course,
            aim: AimCapture::new(settings.aim_mode, settings.activation_margin),
            animator: Animator::new(settings.frame_count),
            motion: MotionGate::default(),
            club: settings.starting_club,
            clubs: settings.clubs,
            distance_scale: settings.distance_scale,
            default_strength: settings.default_strength,
            last_shot: None,
        }
    }

    /// Re-apply tunable values. The aim mode and course layout stay as they are.
    pub fn apply_settings(&mut self, settings: &GolfSettings) {
        self.clubs = settings.clubs;
        self.distance_scale = settings.distance_scale;
        self.default_strength = settings.default_strength;
        self.animator.set_frame_count(settings.frame_count);
        if let AimCapture::Gesture(gesture) = &mut self.aim {
            gesture.set_activation_margin(settings.activation_margin);
        }
        if settings.aim_mode != self.aim.mode() {
            info!("Aim mode change to {:?} applies after restart", settings.aim_mode);
        }
    }

    // === Accessors ===

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn ball_position(&self) -> DVec2 {
        self.course.ball.position
    }

    pub fn aim(&self) -> &AimCapture {
        &self.aim
    }

    pub fn aim_mode(&self) -> AimMode {
        self.aim.mode()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn motion(&self) -> &MotionGate {
        &self.motion
    }

    pub fn club(&self) -> Club {
        self.club
    }

    pub fn clubs(&self) -> &ClubMultipliers {
        &self.clubs
    }

    pub fn last_shot(&self) -> Option<&ShotResolution> {
        self.last_shot.as_ref()
    }

    pub fn swing_in_progress(&self) -> bool {
        self.animator.is_animating()
    }

    /// Whether the swing control should be enabled
    pub fn swing_enabled(&self) -> bool {
        !self.swing_in_progress() && self.aim.base_angle().is_some()
    }

    /// Status line for the player
    pub fn prompt(&self) -> &'static str {
        if self.swing_in_progress() {
            PROMPT_IN_FLIGHT
        } else if self.aim.base_angle().is_some() {
            PROMPT_SWING
        } else {
            match self.aim.mode() {
                AimMode::Gesture => PROMPT_DRAW,
                AimMode::Numeric => PROMPT_ENTER_ANGLE,
            }
        }
    }

    /// Blocking notice shown when swinging without an angle
    pub fn missing_aim_notice(&self) -> &'static str {
        match self.aim.mode() {
            AimMode::Gesture => NOTICE_MISSING_AIM,
            AimMode::Numeric => NOTICE_MISSING_ANGLE,
        }
    }

    // === Aim capture ===

    /// Returns true when a drawing session started
    pub fn pointer_start(&mut self, source: PointerSource, point: DVec2, bus: &mut EventBus) -> bool {
        if self.swing_in_progress() || self.aim.mode() != AimMode::Gesture {
            return false;
        }
        let ball = self.course.ball;
        let started = self.aim.pointer_start(source, ball.position, ball.radius, point);
        if started {
            bus.emit(GolfEvent::AimStarted {
                source: source.to_string(),
            });
        } else {
            bus.emit(GolfEvent::AimIgnored {
                source: source.to_string(),
                x: point.x,
                y: point.y,
            });
        }
        started
    }

    /// Returns true when the aim line moved and needs a redraw
    pub fn pointer_move(&mut self, source: PointerSource, point: DVec2) -> bool {
        if self.swing_in_progress() {
            return false;
        }
        self.aim.pointer_move(source, point)
    }

    /// Returns the base angle when a session completed
    pub fn pointer_end(&mut self, source: PointerSource, point: DVec2, bus: &mut EventBus) -> Option<f64> {
        if self.swing_in_progress() {
            return None;
        }
        let angle = self.aim.pointer_end(source, self.course.ball.position, point)?;
        bus.emit(GolfEvent::AimCompleted { angle });
        Some(angle)
    }

    /// Type into the angle field (numeric mode). Returns true when the text changed.
    pub fn type_angle_char(&mut self, c: char) -> bool {
        self.aim.numeric_mut().is_some_and(|numeric| numeric.push_char(c))
    }

    pub fn erase_angle_char(&mut self) -> bool {
        self.aim.numeric_mut().is_some_and(|numeric| numeric.backspace())
    }

    // === Clubs ===

    pub fn select_club(&mut self, club: Club, bus: &mut EventBus) {
        if club != self.club {
            self.club = club;
            bus.emit(GolfEvent::ClubChanged { club });
        }
    }

    pub fn cycle_club(&mut self, bus: &mut EventBus) {
        self.select_club(self.club.next(), bus);
    }

    // === Motion ===

    /// Drive the motion source through permission and store its newest sample
    pub fn poll_motion(&mut self, source: &mut dyn MotionSource, bus: &mut EventBus) {
        if let Some(state) = self.motion.poll(source) {
            bus.emit(GolfEvent::MotionPermission { state });
        }
    }

    // === Swing ===

    /// Resolve and start a swing. On error nothing changes.
    pub fn swing(
        &mut self,
        sampler: &mut dyn SwingSampler,
        bus: &mut EventBus,
    ) -> Result<ShotResolution, SwingError> {
        let result = self.try_swing(sampler);
        match &result {
            Ok(shot) => bus.emit(GolfEvent::SwingStarted {
                club: self.club,
                base_angle: shot.final_angle - shot.deviation,
                final_angle: shot.final_angle,
                strength: shot.strength,
                distance: shot.distance,
                target: (shot.target.x, shot.target.y),
                motion: shot.sample_origin == SampleOrigin::Motion,
            }),
            Err(err) => bus.emit(GolfEvent::SwingRejected {
                reason: (*err).into(),
            }),
        }
        result
    }

    fn try_swing(&mut self, sampler: &mut dyn SwingSampler) -> Result<ShotResolution, SwingError> {
        if self.swing_in_progress() {
            return Err(SwingError::InProgress);
        }
        let base_angle = self.aim.base_angle().ok_or(SwingError::MissingAim)?;

        let (sample, origin) = swing_sample(self.motion.latest(), sampler, self.default_strength);
        let shot = resolve_shot(
            self.course.ball.position,
            base_angle,
            self.clubs.get(self.club),
            sample,
            self.distance_scale,
            origin,
        );

        self.animator.start(shot.origin, shot.target);
        self.last_shot = Some(shot);
        Ok(shot)
    }

    /// Advance the flight by one frame. Clears the aim on the final frame.
    pub fn tick(&mut self, bus: &mut EventBus) -> Option<TickOutcome> {
        let outcome = self.animator.tick(&mut self.course.ball.position)?;
        if let TickOutcome::Finished { position } = outcome {
            self.aim.reset();
            bus.emit(GolfEvent::SwingFinished {
                position: (position.x, position.y),
                frames: self.animator.frame_count(),
            });
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{MotionSample, PermissionState, ScriptedMotion};
    use crate::swing::FixedSampler;

    fn game(mode: AimMode) -> GolfGame {
        let settings = GolfSettings {
            aim_mode: mode,
            ..Default::default()
        };
        GolfGame::new(Course::new(800.0, 600.0), &settings)
    }

    /// Draw from the ball to `end`
    fn draw(game: &mut GolfGame, bus: &mut EventBus, end: DVec2) {
        let ball = game.ball_position();
        assert!(game.pointer_start(PointerSource::Mouse, ball, bus));
        game.pointer_move(PointerSource::Mouse, (ball + end) / 2.0);
        game.pointer_end(PointerSource::Mouse, end, bus);
    }

    fn run_to_completion(game: &mut GolfGame, bus: &mut EventBus) -> u32 {
        let mut ticks = 0;
        while let Some(outcome) = game.tick(bus) {
            ticks += 1;
            if matches!(outcome, TickOutcome::Finished { .. }) {
                break;
            }
        }
        ticks
    }

    #[test]
    fn test_driver_scenario_lands_on_target() {
        let mut game = game(AimMode::Gesture);
        let mut bus = EventBus::new();
        assert_eq!(game.ball_position(), DVec2::new(50.0, 550.0));
        draw(&mut game, &mut bus, DVec2::new(200.0, 550.0));

        let mut sampler = FixedSampler::new(10.0, 0.0);
        let shot = game.swing(&mut sampler, &mut bus).unwrap();
        assert!((shot.target - DVec2::new(170.0, 550.0)).length() < 1e-9);
        assert!(game.swing_in_progress());
        assert!(!game.swing_enabled());

        assert_eq!(run_to_completion(&mut game, &mut bus), 60);
        assert_eq!(game.ball_position(), shot.target);
        assert!(!game.swing_in_progress());
        assert!(!game.swing_enabled());
        let AimCapture::Gesture(gesture) = game.aim() else {
            panic!("expected gesture aim");
        };
        assert!(gesture.state().is_clear());
        assert_eq!(game.prompt(), PROMPT_DRAW);
    }

    #[test]
    fn test_swing_without_aim_changes_nothing() {
        let mut game = game(AimMode::Gesture);
        let mut bus = EventBus::new();
        let before = game.clone();

        let err = game.swing(&mut FixedSampler::new(10.0, 0.0), &mut bus).unwrap_err();
        assert_eq!(err, SwingError::MissingAim);
        assert_eq!(game.ball_position(), before.ball_position());
        assert!(!game.swing_in_progress());
        assert!(game.last_shot().is_none());

        let events = bus.drain();
        assert_eq!(
            events.last().map(|e| &e.event),
            Some(&GolfEvent::SwingRejected {
                reason: RejectReason::MissingAim
            })
        );
    }

    #[test]
    fn test_swing_while_animating_is_noop() {
        let mut game = game(AimMode::Numeric);
        let mut bus = EventBus::new();
        for c in "45".chars() {
            game.type_angle_char(c);
        }
        let first = game.swing(&mut FixedSampler::new(10.0, 0.0), &mut bus).unwrap();
        game.tick(&mut bus);
        let position = game.ball_position();
        let animator = game.animator().clone();

        let err = game.swing(&mut FixedSampler::new(20.0, 3.0), &mut bus).unwrap_err();
        assert_eq!(err, SwingError::InProgress);
        assert_eq!(game.ball_position(), position);
        assert_eq!(game.animator(), &animator);
        assert_eq!(game.last_shot(), Some(&first));
    }

    #[test]
    fn test_aim_blocked_while_animating() {
        let mut game = game(AimMode::Gesture);
        let mut bus = EventBus::new();
        draw(&mut game, &mut bus, DVec2::new(50.0, 400.0));
        game.swing(&mut FixedSampler::new(5.0, 0.0), &mut bus).unwrap();

        let ball = game.ball_position();
        assert!(!game.pointer_start(PointerSource::Mouse, ball, &mut bus));
        assert!(!game.aim().is_drawing());
    }

    #[test]
    fn test_numeric_angle_survives_shot() {
        let mut game = game(AimMode::Numeric);
        let mut bus = EventBus::new();
        assert!(!game.swing_enabled());
        assert_eq!(game.prompt(), PROMPT_ENTER_ANGLE);
        game.type_angle_char('9');
        game.type_angle_char('0');
        assert!(game.swing_enabled());

        game.swing(&mut FixedSampler::new(5.0, 0.0), &mut bus).unwrap();
        run_to_completion(&mut game, &mut bus);
        assert_eq!(game.aim().base_angle(), Some(90.0));
        assert!(game.swing_enabled());
    }

    #[test]
    fn test_motion_sample_overrides_sampler() {
        let mut game = game(AimMode::Numeric);
        let mut bus = EventBus::new();
        game.type_angle_char('0');

        let mut sensor = ScriptedMotion::new(vec![MotionSample::new(-6.0, 0.0)]);
        game.poll_motion(&mut sensor, &mut bus);
        assert_eq!(game.motion().permission(), PermissionState::Granted);

        let shot = game.swing(&mut FixedSampler::new(19.0, 4.0), &mut bus).unwrap();
        assert_eq!(shot.sample_origin, SampleOrigin::Motion);
        // |-6| * driver 1.2 * scale 10
        assert!((shot.distance - 72.0).abs() < 1e-9);
        assert!((shot.target - DVec2::new(122.0, 550.0)).length() < 1e-9);
    }

    #[test]
    fn test_club_change_emits_once() {
        let mut game = game(AimMode::Gesture);
        let mut bus = EventBus::new();
        game.select_club(Club::Driver, &mut bus);
        assert!(!bus.has_pending());
        game.cycle_club(&mut bus);
        assert_eq!(game.club(), Club::Iron);
        assert_eq!(bus.drain().len(), 1);
    }
}
