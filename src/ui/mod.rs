//! UI module - HUD controls and the blocking notice overlay

mod hud;
mod notice;

pub use hud::*;
pub use notice::*;

use bevy::prelude::*;

use crate::game::GolfSystems;
use crate::input::InputSystems;

/// Windowed HUD. Button presses are buffered with the rest of the input.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_hud, setup_notice))
            .add_systems(Update, handle_hud_buttons.in_set(InputSystems))
            .add_systems(
                Update,
                (style_hud_buttons, update_hud_text, update_notice_overlay).after(GolfSystems),
            );
    }
}
