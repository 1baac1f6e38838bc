//! Ships of the agent's fleet.
//!
//! Only the parts the resource layer derives views from are modelled in detail;
//! frame, reactor, engine, modules and mounts pass through as raw JSON.

use crate::model::Cooldown;
use serde::{Deserialize, Serialize};

/// A ship as returned by `GET /my/ships/{shipSymbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub symbol: String,
    pub registration: ShipRegistration,
    pub nav: ShipNav,
    pub fuel: ShipFuel,
    pub cargo: ShipCargo,
    pub cooldown: Cooldown,
    #[serde(default)]
    pub frame: serde_json::Value,
    #[serde(default)]
    pub modules: Vec<serde_json::Value>,
    #[serde(default)]
    pub mounts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipRegistration {
    pub name: String,
    pub faction_symbol: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipNav {
    pub system_symbol: String,
    pub waypoint_symbol: String,
    pub status: NavStatus,
    pub flight_mode: String,
}

/// Where a ship is relative to its waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavStatus {
    InTransit,
    InOrbit,
    Docked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipFuel {
    pub current: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipCargo {
    pub capacity: u32,
    pub units: u32,
    #[serde(default)]
    pub inventory: Vec<CargoItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoItem {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub units: u32,
}
