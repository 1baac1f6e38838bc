//! Star systems and the waypoints inside them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub symbol: String,
    pub sector_symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub waypoints: Vec<SystemWaypoint>,
    #[serde(default)]
    pub factions: Vec<FactionSymbol>,
}

/// The short waypoint entry embedded in a [`System`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemWaypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionSymbol {
    pub symbol: String,
}

/// A full waypoint, as listed by `GET /systems/{systemSymbol}/waypoints`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub system_symbol: String,
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub traits: Vec<WaypointTrait>,
    #[serde(default)]
    pub orbits: Option<String>,
    #[serde(default)]
    pub is_under_construction: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaypointTrait {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
