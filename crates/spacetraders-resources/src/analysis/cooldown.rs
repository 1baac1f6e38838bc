//! # Cooldown Classification
//!
//! Turns a remaining-seconds snapshot into something an agent can act on:
//!
//! | remaining (s) | priority    |
//! |---------------|-------------|
//! | `<= 0`        | `READY`     |
//! | `1..=60`      | `FINISHING` |
//! | `61..=300`    | `SHORT`     |
//! | `301..=600`   | `MEDIUM`    |
//! | `> 600`       | `LONG`      |
//!
//! While a ship is cooling down, action-type operations are blocked but movement
//! continues: navigation-adjacent operations stay permitted whatever the cooldown.

use crate::model::Cooldown;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Operations the remote refuses while a ship's cooldown is running.
pub const ACTION_OPERATIONS: [&str; 8] = [
    "extract",
    "extract_with_survey",
    "siphon",
    "create_survey",
    "scan_systems",
    "scan_waypoints",
    "scan_ships",
    "jump",
];

/// Operations that are never affected by a cooldown.
pub const NAVIGATION_OPERATIONS: [&str; 6] = [
    "navigate",
    "warp",
    "orbit",
    "dock",
    "refuel",
    "set_flight_mode",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CooldownPriority {
    Ready,
    Finishing,
    Short,
    Medium,
    Long,
}

impl CooldownPriority {
    pub fn from_remaining(remaining_seconds: i64) -> Self {
        match remaining_seconds {
            i64::MIN..=0 => CooldownPriority::Ready,
            1..=60 => CooldownPriority::Finishing,
            61..=300 => CooldownPriority::Short,
            301..=600 => CooldownPriority::Medium,
            _ => CooldownPriority::Long,
        }
    }

    pub fn is_ready(self) -> bool {
        self == CooldownPriority::Ready
    }
}

/// Classification of one remaining-seconds value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownStatus {
    pub priority: CooldownPriority,
    pub human_time_display: String,
    pub blocked_operations: BTreeSet<&'static str>,
    pub permitted_operations: BTreeSet<&'static str>,
}

impl CooldownStatus {
    pub fn is_blocked(&self, operation: &str) -> bool {
        self.blocked_operations.contains(operation)
    }
}

/// Classifies a remaining-seconds value. Negative values count as ready.
pub fn classify(remaining_seconds: i64) -> CooldownStatus {
    let priority = CooldownPriority::from_remaining(remaining_seconds);

    let mut permitted: BTreeSet<&'static str> = NAVIGATION_OPERATIONS.into_iter().collect();
    let blocked: BTreeSet<&'static str> = if priority.is_ready() {
        permitted.extend(ACTION_OPERATIONS);
        BTreeSet::new()
    } else {
        ACTION_OPERATIONS.into_iter().collect()
    };

    CooldownStatus {
        priority,
        human_time_display: format_duration(remaining_seconds),
        blocked_operations: blocked,
        permitted_operations: permitted,
    }
}

/// Renders seconds as `"{h}h {m}m {s}s"`, dropping leading zero units.
///
/// `0` (or less) renders as `"Ready now"`.
pub fn format_duration(seconds: i64) -> String {
    if seconds <= 0 {
        return "Ready now".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Read-only view over a [`Cooldown`] record, recomputed on every request.
///
/// `remaining_seconds` is clamped to `0..=total_seconds`. A record whose total is
/// smaller than its remaining time keeps the remaining time and raises the total,
/// so a running cooldown is never reported as ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownView {
    pub ship_symbol: String,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub expiration: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub status: CooldownStatus,
}

impl CooldownView {
    pub fn from_record(record: &Cooldown) -> Self {
        let remaining = record.remaining_seconds.max(0);
        let total = record.total_seconds.max(remaining);
        Self {
            ship_symbol: record.ship_symbol.clone(),
            total_seconds: total,
            remaining_seconds: remaining,
            expiration: record.expiration,
            status: classify(remaining),
        }
    }

    /// View for a ship with no active cooldown.
    pub fn idle(ship_symbol: &str) -> Self {
        Self {
            ship_symbol: ship_symbol.to_string(),
            total_seconds: 0,
            remaining_seconds: 0,
            expiration: None,
            status: classify(0),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status.priority.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CooldownPriority::*;

    #[test]
    fn classification_boundaries() {
        let cases = [
            (-5, Ready),
            (0, Ready),
            (1, Finishing),
            (60, Finishing),
            (61, Short),
            (300, Short),
            (301, Medium),
            (600, Medium),
            (601, Long),
            (1000, Long),
        ];
        for (remaining, expected) in cases {
            assert_eq!(classify(remaining).priority, expected, "remaining = {remaining}");
        }
    }

    #[test]
    fn human_time_display() {
        assert_eq!(format_duration(0), "Ready now");
        assert_eq!(format_duration(-30), "Ready now");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(90), "1m 30s");
        assert_eq!(format_duration(3600), "1h 0m 0s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
    }

    #[test]
    fn ready_permits_everything() {
        let status = classify(0);
        assert!(status.blocked_operations.is_empty());
        assert_eq!(
            status.permitted_operations.len(),
            ACTION_OPERATIONS.len() + NAVIGATION_OPERATIONS.len()
        );
        assert_eq!(status.human_time_display, "Ready now");
    }

    #[test]
    fn cooling_down_blocks_actions_but_not_movement() {
        for remaining in [1, 60, 61, 300, 301, 600, 601] {
            let status = classify(remaining);
            for op in ACTION_OPERATIONS {
                assert!(status.is_blocked(op), "{op} at {remaining}");
                assert!(!status.permitted_operations.contains(op));
            }
            for op in NAVIGATION_OPERATIONS {
                assert!(!status.is_blocked(op), "{op} at {remaining}");
                assert!(status.permitted_operations.contains(op));
            }
        }
    }

    #[test]
    fn view_clamps_remaining() {
        let view = CooldownView::from_record(&Cooldown {
            ship_symbol: "S-1".into(),
            total_seconds: 70,
            remaining_seconds: -12,
            expiration: None,
        });
        assert_eq!(view.remaining_seconds, 0);
        assert!(view.is_ready());

        let view = CooldownView::from_record(&Cooldown {
            ship_symbol: "S-1".into(),
            total_seconds: 10,
            remaining_seconds: 90,
            expiration: None,
        });
        assert_eq!(view.remaining_seconds, 90);
        assert_eq!(view.total_seconds, 90);
        assert_eq!(view.status.priority, Short);
        assert_eq!(view.status.human_time_display, "1m 30s");
    }

    #[test]
    fn view_serializes_flat() {
        let json = serde_json::to_value(CooldownView::idle("S-1")).unwrap();
        assert_eq!(json["shipSymbol"], "S-1");
        assert_eq!(json["priority"], "READY");
        assert_eq!(json["humanTimeDisplay"], "Ready now");
        assert!(json["blockedOperations"].as_array().unwrap().is_empty());
    }
}
