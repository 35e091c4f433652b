//! Game module - session state, buffered input, and the headless GolfPlugin

mod input;
mod state;
mod systems;

pub use input::*;
pub use state::*;
pub use systems::*;

use bevy::prelude::*;

use crate::course::Course;
use crate::events::{EventBus, EventLogConfig, log_golf_events, update_event_bus_time};
use crate::settings::GolfSettings;

/// Systems that mutate game state each frame (input is applied before, rendering after)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GolfSystems;

/// Core game logic. Has no window or rendering requirements, so it runs
/// under `MinimalPlugins` for scenario tests.
pub struct GolfPlugin {
    pub settings: GolfSettings,
    pub course: Course,
}

impl GolfPlugin {
    /// Course sized from the configured window and canvas fractions
    pub fn new(settings: GolfSettings) -> Self {
        let course = Course::for_window(
            settings.window_width as f64,
            settings.window_height as f64,
            settings.canvas_width_fraction,
            settings.canvas_height_fraction,
        );
        Self { settings, course }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.course = course;
        self
    }
}

impl Plugin for GolfPlugin {
    fn build(&self, app: &mut App) {
        info!(
            "Course {}x{}, aim mode {:?}, club {}",
            self.course.width, self.course.height, self.settings.aim_mode, self.settings.starting_club
        );

        app.insert_resource(GolfGame::new(self.course.clone(), &self.settings))
            .insert_resource(self.settings.clone())
            .insert_resource(ShotSampler::from_settings(&self.settings))
            .insert_resource(MotionFeed::from_settings(&self.settings.motion))
            .insert_resource(EventBus::new())
            .init_resource::<EventLogConfig>()
            .init_resource::<GolfInput>()
            .init_resource::<Notice>()
            // Draw once on load
            .insert_resource(RedrawRequest(true))
            .add_systems(
                Update,
                (
                    update_event_bus_time,
                    poll_motion,
                    apply_golf_input,
                    advance_swing,
                    log_golf_events,
                )
                    .chain()
                    .in_set(GolfSystems),
            );
    }
}
