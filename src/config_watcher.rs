//! Settings file auto-reload
//!
//! Polls the settings file every few seconds and applies tuning changes
//! between shots. Course geometry and window size need a restart.

use bevy::prelude::*;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::events::{EventBus, GolfEvent};
use crate::game::{GolfGame, ShotSampler};
use crate::settings::{GolfSettings, SettingsPath};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 3.0;

/// Tracks the settings file modification time for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub settings_mtime: Option<SystemTime>,
    /// A change seen mid-swing, applied once the ball stops
    pub pending: bool,
}

impl ConfigWatcher {
    pub fn new(path: &Path) -> Self {
        Self {
            timer: 0.0,
            settings_mtime: get_mtime(path),
            pending: false,
        }
    }

    /// Advance the poll timer; returns true when the file changed since the last look
    pub fn poll(&mut self, delta_secs: f32, path: &Path) -> bool {
        self.timer += delta_secs;
        if self.timer < CHECK_INTERVAL {
            return false;
        }
        self.timer = 0.0;

        let mtime = get_mtime(path);
        if mtime != self.settings_mtime {
            self.settings_mtime = mtime;
            return true;
        }
        false
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Reload the settings file when it changes
pub fn check_config_changes(
    time: Res<Time>,
    path: Res<SettingsPath>,
    mut watcher: ResMut<ConfigWatcher>,
    mut settings: ResMut<GolfSettings>,
    mut game: ResMut<GolfGame>,
    mut sampler: ResMut<ShotSampler>,
    mut bus: ResMut<EventBus>,
) {
    if watcher.poll(time.delta_secs(), &path.0) {
        watcher.pending = true;
    }
    if !watcher.pending || game.swing_in_progress() {
        return;
    }
    watcher.pending = false;

    let reloaded = GolfSettings::load_from(&path.0);
    if reloaded == *settings {
        return;
    }

    game.apply_settings(&reloaded);
    if reloaded.seed != settings.seed
        || reloaded.strength_range != settings.strength_range
        || reloaded.deviation_range != settings.deviation_range
    {
        *sampler = ShotSampler::from_settings(&reloaded);
    }
    *settings = reloaded;
    info!("Auto-reloaded settings from {}", path.0.display());
    bus.emit(GolfEvent::SettingsReloaded);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_waits_for_interval() {
        let path = std::env::temp_dir().join("minigolf_watcher_missing.json");
        let mut watcher = ConfigWatcher::new(&path);
        assert!(!watcher.poll(1.0, &path));
        assert!(!watcher.poll(CHECK_INTERVAL, &path));
        assert_eq!(watcher.timer, 0.0);
    }

    #[test]
    fn test_poll_sees_new_file() {
        let path = std::env::temp_dir().join(format!("minigolf_watcher_{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        let mut watcher = ConfigWatcher::new(&path);

        fs::write(&path, "{}").unwrap();
        assert!(watcher.poll(CHECK_INTERVAL, &path));
        assert!(!watcher.poll(CHECK_INTERVAL, &path));
        let _ = fs::remove_file(&path);
    }
}
