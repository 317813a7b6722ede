//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::snapshot::DeviceState;
use chrono::{DateTime, Local, Utc};
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::StatusPoller => Color::Cyan,
        Worker::DeviceManager => Color::Yellow,
    }
}

/// Color of a device card by state.
pub fn get_state_color(state: DeviceState) -> Color {
    match state {
        DeviceState::Online => Color::LightGreen,
        DeviceState::Offline => Color::LightRed,
        DeviceState::Checking => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min_sec)) = (date_part.get(5..10), time_part.get(0..8)) {
            return format!("{} {}", month_day, hour_min_sec);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Render a backend epoch timestamp (seconds, fractional) as local time.
pub fn format_backend_timestamp(epoch_secs: f64) -> Option<String> {
    if !epoch_secs.is_finite() || epoch_secs < 0.0 {
        return None;
    }
    let secs = epoch_secs.trunc() as i64;
    let nanos = (epoch_secs.fract() * 1e9) as u32;
    let utc = DateTime::<Utc>::from_timestamp(secs, nanos)?;
    Some(utc.with_timezone(&Local).format("%H:%M:%S").to_string())
}

/// Uptime as `1d 2h 3m 4s`, dropping leading zero units.
pub fn format_uptime(secs: u64) -> String {
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60,
    );
    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(
            format_compact_timestamp("2025-03-14 09:26:53"),
            "03-14 09:26:53"
        );
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_backend_timestamp_rejects_nonsense() {
        assert!(format_backend_timestamp(f64::NAN).is_none());
        assert!(format_backend_timestamp(-1.0).is_none());
        let formatted = format_backend_timestamp(1_700_000_000.25).unwrap();
        assert_eq!(formatted.len(), "HH:MM:SS".len());
    }

    #[test]
    fn test_uptime() {
        assert_eq!(format_uptime(5), "5s");
        assert_eq!(format_uptime(65), "1m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_061), "1d 1h 1m 1s");
    }
}
