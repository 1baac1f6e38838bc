use serde::{Deserialize, Serialize};

/// The player's agent, as returned by `GET /my/agent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(default)]
    pub account_id: Option<String>,
    pub symbol: String,
    pub headquarters: String,
    pub credits: i64,
    pub starting_faction: String,
    #[serde(default)]
    pub ship_count: u32,
}
