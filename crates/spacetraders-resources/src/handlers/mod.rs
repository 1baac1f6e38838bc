//! # Resource Handlers
//!
//! One [`ResourceHandler`](resource_framework::ResourceHandler) per addressable
//! resource. Handlers read their parameters from
//! [`ExtractedParameters`](resource_framework::ExtractedParameters), fetch through the
//! [`ApiContext`] and shape the result into a [`ResourcePayload`].
//!
//! [`route_table`] binds them to their templates, in this order:
//!
//! | Template | Handler |
//! |----------|---------|
//! | `spacetraders://agent/info` | [`AgentInfo`] |
//! | `spacetraders://ships/list` | [`ShipList`] |
//! | `spacetraders://ships/{shipSymbol}` | [`ShipDetail`] |
//! | `spacetraders://ships/{shipSymbol}/cooldown` | [`ShipCooldown`] |
//! | `spacetraders://contracts/list` | [`ContractList`] |
//! | `spacetraders://systems` | [`SystemList`] |
//! | `spacetraders://systems/{systemSymbol}` | [`SystemDetail`] |
//! | `spacetraders://systems/{systemSymbol}/waypoints` | [`WaypointList`] |
//! | `.../waypoints/{waypointSymbol}/market` | [`MarketDetail`] |
//! | `.../waypoints/{waypointSymbol}/shipyard` | [`ShipyardDetail`] |
//!
//! `ships/list` is registered before `ships/{shipSymbol}`: both have two segments,
//! and the literal form has to win. A ship whose symbol is literally `list` is
//! therefore unreachable through `ships/{shipSymbol}`; read it from the fleet.

mod agent;
mod contracts;
mod fleet;
mod systems;

pub use agent::AgentInfo;
pub use contracts::ContractList;
pub use fleet::{ShipCooldown, ShipDetail, ShipList};
pub use systems::{MarketDetail, ShipyardDetail, SystemDetail, SystemList, WaypointList};

use crate::analysis::{ContractDeadlineView, CooldownView, FleetSummary, ShipStatusView};
use crate::api::SpaceTradersApi;
use crate::model::{Agent, Market, Ship, Shipyard, System, Waypoint};
use chrono::{DateTime, Utc};
use resource_framework::{FetchPolicy, PaginatedCollection, RouteTable, TemplateError};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const SCHEME: &str = "spacetraders://";

/// Everything a handler needs for one dispatch.
#[derive(Clone)]
pub struct ApiContext {
    pub api: Arc<dyn SpaceTradersApi>,
    pub policy: FetchPolicy,
    pub cancel: CancellationToken,
    /// Reference time for deadline arithmetic.
    pub now: DateTime<Utc>,
}

impl ApiContext {
    pub fn new(api: Arc<dyn SpaceTradersApi>, policy: FetchPolicy) -> Self {
        Self {
            api,
            policy,
            cancel: CancellationToken::new(),
            now: Utc::now(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// The typed result of a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ResourcePayload {
    Agent(Agent),
    Fleet {
        ships: PaginatedCollection<Ship>,
        summary: FleetSummary,
    },
    Ship(Box<ShipStatusView>),
    Cooldown(CooldownView),
    Contracts(PaginatedCollection<ContractDeadlineView>),
    Systems(PaginatedCollection<System>),
    System(System),
    Waypoints(PaginatedCollection<Waypoint>),
    Market(Market),
    Shipyard(Shipyard),
}

/// Builds the route table for every SpaceTraders resource.
pub fn route_table() -> Result<RouteTable<ApiContext, ResourcePayload>, TemplateError> {
    let table = RouteTable::builder(SCHEME)
        .route(
            "spacetraders://agent/info",
            "agent",
            "The agent's account: credits, headquarters, faction",
            AgentInfo,
        )?
        .route(
            "spacetraders://ships/list",
            "fleet",
            "Every ship of the fleet with a per-status summary",
            ShipList,
        )?
        .route(
            "spacetraders://ships/{shipSymbol}",
            "ship",
            "One ship with fuel, cargo and cooldown status",
            ShipDetail,
        )?
        .route(
            "spacetraders://ships/{shipSymbol}/cooldown",
            "ship-cooldown",
            "Cooldown of one ship and the operations it blocks",
            ShipCooldown,
        )?
        .route(
            "spacetraders://contracts/list",
            "contracts",
            "Every contract with time left to its deadline",
            ContractList,
        )?
        .route("spacetraders://systems", "systems", "Every star system", SystemList)?
        .route(
            "spacetraders://systems/{systemSymbol}",
            "system",
            "One star system",
            SystemDetail,
        )?
        .route(
            "spacetraders://systems/{systemSymbol}/waypoints",
            "waypoints",
            "Every waypoint of a system",
            WaypointList,
        )?
        .route(
            "spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/market",
            "market",
            "Imports, exports and prices of a waypoint's market",
            MarketDetail,
        )?
        .route(
            "spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/shipyard",
            "shipyard",
            "Ship types sold at a waypoint's shipyard",
            ShipyardDetail,
        )?
        .build();
    Ok(table)
}
