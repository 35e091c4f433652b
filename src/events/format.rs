//! Compact text format for golf event lines
//!
//! Format: `T:NNNNN|CODE|data...`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - CODE = 2-char event type code
//! - data = pipe-separated values specific to event type
//!
//! Examples:
//! ```text
//! T:00000|MP|unavailable
//! T:01520|AS|mouse
//! T:02210|AC|45.0
//! T:02900|SS|driver|45.0|47.3|14.2|170.4|165.6,427.3|sim
//! T:03900|SF|165.6,427.3|60
//! ```

use super::types::GolfEvent;

/// Format a position tuple
fn fmt_pos(pos: (f64, f64)) -> String {
    format!("{:.1},{:.1}", pos.0, pos.1)
}

/// Serialize a GolfEvent to compact text format
pub fn serialize_event(time_ms: u32, event: &GolfEvent) -> String {
    let ts = format!("T:{:05}", time_ms % 100000);
    let code = event.type_code();

    let data = match event {
        GolfEvent::AimStarted { source } => source.clone(),
        GolfEvent::AimCompleted { angle } => format!("{:.1}", angle),
        GolfEvent::AimIgnored { source, x, y } => format!("{}|{}", source, fmt_pos((*x, *y))),
        GolfEvent::SwingStarted {
            club,
            base_angle,
            final_angle,
            strength,
            distance,
            target,
            motion,
        } => format!(
            "{}|{:.1}|{:.1}|{:.1}|{:.1}|{}|{}",
            club,
            base_angle,
            final_angle,
            strength,
            distance,
            fmt_pos(*target),
            if *motion { "motion" } else { "sim" }
        ),
        GolfEvent::SwingFinished { position, frames } => {
            format!("{}|{}", fmt_pos(*position), frames)
        }
        GolfEvent::SwingRejected { reason } => reason.to_string(),
        GolfEvent::ClubChanged { club } => club.to_string(),
        GolfEvent::MotionPermission { state } => state.to_string(),
        GolfEvent::SettingsReloaded => String::new(),
    };

    if data.is_empty() {
        format!("{}|{}", ts, code)
    } else {
        format!("{}|{}|{}", ts, code, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clubs::Club;
    use crate::events::RejectReason;

    #[test]
    fn test_swing_started_line() {
        let event = GolfEvent::SwingStarted {
            club: Club::Driver,
            base_angle: 0.0,
            final_angle: 0.0,
            strength: 12.0,
            distance: 120.0,
            target: (170.0, 550.0),
            motion: false,
        };
        assert_eq!(
            serialize_event(2900, &event),
            "T:02900|SS|driver|0.0|0.0|12.0|120.0|170.0,550.0|sim"
        );
    }

    #[test]
    fn test_timestamp_wraps() {
        let line = serialize_event(123456, &GolfEvent::SettingsReloaded);
        assert_eq!(line, "T:23456|RL");
    }

    #[test]
    fn test_rejection_line() {
        let event = GolfEvent::SwingRejected {
            reason: RejectReason::MissingAim,
        };
        assert_eq!(serialize_event(10, &event), "T:00010|SR|missing_aim");
    }
}
