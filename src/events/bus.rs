//! Event Bus - central hub for golf events
//!
//! The EventBus decouples the systems that change game state from the
//! ones that report it:
//! - Game state operations emit aim/swing events
//! - The logger drains and writes them each frame
//! - Scenario tests inspect them for expected sequences

use bevy::prelude::*;

use super::types::GolfEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Time in milliseconds since app start
    pub time_ms: u32,
    /// The event data
    pub event: GolfEvent,
}

/// Central event bus
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,

    /// Events that have been consumed
    processed: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (for testing/simulation)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GolfEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    /// Get all processed events
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Check if the bus has any pending events
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clubs::Club;
    use crate::events::RejectReason;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.update_time(1.5);

        bus.emit(GolfEvent::AimCompleted { angle: 45.0 });

        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert!(!bus.has_pending());
        assert_eq!(bus.processed().len(), 1);
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(GolfEvent::SettingsReloaded);
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_drain_keeps_order() {
        let mut bus = EventBus::new();
        bus.emit(GolfEvent::ClubChanged { club: Club::Iron });
        bus.emit(GolfEvent::SwingRejected {
            reason: RejectReason::InProgress,
        });

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        if let GolfEvent::SwingRejected { reason } = &events[1].event {
            assert_eq!(*reason, RejectReason::InProgress);
        } else {
            panic!("Wrong event type");
        }

        bus.clear_processed();
        assert!(bus.processed().is_empty());
    }
}
