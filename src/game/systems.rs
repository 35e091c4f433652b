//! Per-frame game systems

use bevy::prelude::*;

use crate::motion::{MotionSource, NoMotionSensor, ScriptedMotion};
use crate::settings::{GolfSettings, MotionSettings};
use crate::swing::{RandomSampler, SwingSampler};
use crate::events::EventBus;

use super::input::{AngleKey, GolfInput, Notice, PointerPhase, RedrawRequest};
use super::state::{GolfGame, SwingError};

/// Randomness used for simulated swings
#[derive(Resource)]
pub struct ShotSampler(pub Box<dyn SwingSampler>);

impl ShotSampler {
    pub fn new(sampler: impl SwingSampler + 'static) -> Self {
        Self(Box::new(sampler))
    }

    /// Seeded when the settings carry a seed
    pub fn from_settings(settings: &GolfSettings) -> Self {
        let sampler = match settings.seed {
            Some(seed) => {
                info!("Simulated swings seeded with {}", seed);
                RandomSampler::seeded(seed)
            }
            None => RandomSampler::new(),
        };
        Self::new(sampler.with_ranges(settings.strength_range, settings.deviation_range))
    }
}

/// The platform motion sensor
#[derive(Resource)]
pub struct MotionFeed(pub Box<dyn MotionSource>);

impl MotionFeed {
    pub fn new(source: impl MotionSource + 'static) -> Self {
        Self(Box::new(source))
    }

    /// Replay configured samples, or report no sensor
    pub fn from_settings(motion: &MotionSettings) -> Self {
        if motion.samples.is_empty() && motion.permission.is_none() {
            return Self::new(NoMotionSensor);
        }
        let mut source = ScriptedMotion::new(motion.samples.clone());
        if let Some(outcome) = motion.permission {
            source = source.with_permission(outcome);
        }
        Self::new(source)
    }
}

/// Feed buffered player input into the game
pub fn apply_golf_input(
    mut input: ResMut<GolfInput>,
    mut game: ResMut<GolfGame>,
    mut sampler: ResMut<ShotSampler>,
    mut bus: ResMut<EventBus>,
    mut notice: ResMut<Notice>,
    mut redraw: ResMut<RedrawRequest>,
) {
    // The notice blocks everything until dismissed. Lifting the finger or
    // button that owns a drawing session still ends it.
    if notice.is_visible() {
        for event in std::mem::take(&mut input.pointer) {
            if event.phase == PointerPhase::End
                && game.pointer_end(event.source, event.point, &mut bus).is_some()
            {
                redraw.request();
            }
        }
        if input.dismiss_pressed {
            notice.dismiss();
            redraw.request();
        }
        input.clear();
        return;
    }

    if let Some(club) = input.select_club.take() {
        game.select_club(club, &mut bus);
    }
    if input.cycle_club_pressed {
        game.cycle_club(&mut bus);
    }

    for event in std::mem::take(&mut input.pointer) {
        let changed = match event.phase {
            PointerPhase::Start => game.pointer_start(event.source, event.point, &mut bus),
            PointerPhase::Move => game.pointer_move(event.source, event.point),
            PointerPhase::End => game.pointer_end(event.source, event.point, &mut bus).is_some(),
        };
        if changed {
            redraw.request();
        }
    }

    for key in std::mem::take(&mut input.angle_keys) {
        match key {
            AngleKey::Char(c) => game.type_angle_char(c),
            AngleKey::Backspace => game.erase_angle_char(),
        };
    }

    if input.swing_pressed {
        match game.swing(sampler.0.as_mut(), &mut bus) {
            Ok(_) => redraw.request(),
            Err(SwingError::MissingAim) => {
                let message = game.missing_aim_notice();
                notice.show(message);
            }
            Err(SwingError::InProgress) => debug!("Swing ignored, ball still moving"),
        }
    }

    input.clear();
}

/// Advance an in-flight shot by one frame
pub fn advance_swing(
    mut game: ResMut<GolfGame>,
    mut bus: ResMut<EventBus>,
    mut redraw: ResMut<RedrawRequest>,
) {
    if game.tick(&mut bus).is_some() {
        redraw.request();
    }
}

/// Pump the motion sensor
pub fn poll_motion(mut game: ResMut<GolfGame>, mut feed: ResMut<MotionFeed>, mut bus: ResMut<EventBus>) {
    game.poll_motion(feed.0.as_mut(), &mut bus);
}
