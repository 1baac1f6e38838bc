use serde::{Deserialize, Serialize};

/// A shipyard at a waypoint.
///
/// `ships` (with prices) is only reported while one of the agent's ships is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipyard {
    pub symbol: String,
    #[serde(default)]
    pub ship_types: Vec<ShipTypeEntry>,
    #[serde(default)]
    pub ships: Option<Vec<ShipyardShip>>,
    #[serde(default)]
    pub modifications_fee: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipTypeEntry {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipyardShip {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub supply: Option<String>,
    pub purchase_price: i64,
}
