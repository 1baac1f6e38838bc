use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw cooldown record reported by the remote.
///
/// `remaining_seconds` is a snapshot taken when the remote answered; it is never
/// trusted to be within `0..=total_seconds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cooldown {
    pub ship_symbol: String,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}
