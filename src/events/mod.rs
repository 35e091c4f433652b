//! Golf event logging
//!
//! Game state operations emit events onto the EventBus; the logger drains
//! them every frame into compact text lines via Bevy's tracing macros.

mod bus;
mod format;
mod logger;
mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use format::serialize_event;
pub use logger::{EventLogConfig, log_golf_events};
pub use types::{GolfEvent, RejectReason};
