//! Event logger - writes drained bus events through Bevy's log macros

use bevy::prelude::*;

use super::bus::EventBus;
use super::format::serialize_event;

/// Logging switches
#[derive(Resource, Clone, Debug)]
pub struct EventLogConfig {
    /// Whether events are written at all
    pub enabled: bool,
    /// Keep drained events in the bus history (scenario tests read them)
    pub keep_history: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keep_history: false,
        }
    }
}

/// Drain the bus once per frame and log every event as a compact line
pub fn log_golf_events(mut bus: ResMut<EventBus>, config: Res<EventLogConfig>) {
    if !bus.has_pending() {
        return;
    }

    for bus_event in bus.drain() {
        if !config.enabled {
            continue;
        }
        let line = serialize_event(bus_event.time_ms, &bus_event.event);
        if bus_event.event.is_verbose() {
            debug!("{}", line);
        } else {
            info!("{}", line);
        }
    }

    if !config.keep_history {
        bus.clear_processed();
    }
}
