//! Minigolf - draw a shot direction, pick a club, swing
//!
//! Main entry point: app setup and plugin registration.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use minigolf::config_watcher::{self, ConfigWatcher};
use minigolf::constants::*;
use minigolf::game::{GolfPlugin, GolfSystems};
use minigolf::input::WindowInputPlugin;
use minigolf::render::CanvasPlugin;
use minigolf::settings::{CliError, GolfSettings, SettingsPath, config_path_from_args};
use minigolf::ui::HudPlugin;

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let settings_path = config_path_from_args(&args);

    let settings = match GolfSettings::from_args(&args) {
        Ok(settings) => settings,
        Err(err) => {
            match &err {
                CliError::Help(text) => println!("{}", text),
                CliError::Invalid(message) => eprintln!("{}", message),
            }
            std::process::exit(err.exit_code());
        }
    };

    // Save defaults on first run so the file exists for editing
    if !settings_path.exists() {
        if let Err(e) = GolfSettings::default().save_to(&settings_path) {
            warn!("Failed to save initial settings: {}", e);
        }
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                // Set scale_factor_override to 1.0 so canvas pixels match window pixels
                resolution: WindowResolution::new(settings.window_width, settings.window_height)
                    .with_scale_factor_override(1.0),
                title: "Minigolf".into(),
                resizable: false,
                fit_canvas_to_parent: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(UI_BACKGROUND))
        .insert_resource(ConfigWatcher::new(&settings_path))
        .insert_resource(SettingsPath(settings_path))
        .add_plugins((
            GolfPlugin::new(settings),
            WindowInputPlugin,
            CanvasPlugin,
            HudPlugin,
        ))
        .add_systems(
            Update,
            config_watcher::check_config_changes.before(GolfSystems),
        )
        .run();
}
