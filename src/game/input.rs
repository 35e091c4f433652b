//! Buffered player input, filled by the window front end or a scenario script

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::aim::PointerSource;
use crate::clubs::Club;

/// Phase of a normalised pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// One pointer event in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
    pub point: DVec2,
}

impl PointerEvent {
    pub fn start(source: PointerSource, point: DVec2) -> Self {
        Self {
            phase: PointerPhase::Start,
            source,
            point,
        }
    }

    pub fn moved(source: PointerSource, point: DVec2) -> Self {
        Self {
            phase: PointerPhase::Move,
            source,
            point,
        }
    }

    pub fn end(source: PointerSource, point: DVec2) -> Self {
        Self {
            phase: PointerPhase::End,
            source,
            point,
        }
    }
}

/// Edit to the typed angle field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleKey {
    Char(char),
    Backspace,
}

/// Input accumulated until the next `apply_golf_input` run
#[derive(Resource, Debug, Default)]
pub struct GolfInput {
    pub pointer: Vec<PointerEvent>,
    pub angle_keys: Vec<AngleKey>,
    pub swing_pressed: bool,
    pub cycle_club_pressed: bool,
    pub select_club: Option<Club>,
    pub dismiss_pressed: bool,
}

impl GolfInput {
    pub fn push_pointer(&mut self, event: PointerEvent) {
        self.pointer.push(event);
    }

    /// Drop everything buffered
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Blocking message for the player. While set, gameplay input is discarded.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Notice {
    pub message: Option<String>,
}

impl Notice {
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// Set when the canvas needs to be drawn again this frame
#[derive(Resource, Debug, Default)]
pub struct RedrawRequest(pub bool);

impl RedrawRequest {
    pub fn request(&mut self) {
        self.0 = true;
    }

    /// Returns whether a redraw was pending and resets the flag
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.0)
    }
}
