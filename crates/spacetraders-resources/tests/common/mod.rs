//! Shared fixtures for integration tests, built from JSON shaped like the remote's.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use resource_framework::FetchPolicy;
use serde_json::json;
use spacetraders_resources::api::MockApi;
use spacetraders_resources::lifecycle::ResourceSystem;
use spacetraders_resources::model::{Agent, Contract, Cooldown, Market, Ship, Shipyard, System, Waypoint};
use std::sync::Arc;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn policy(page_limit: u32) -> FetchPolicy {
    FetchPolicy {
        page_limit,
        ..FetchPolicy::default()
    }
}

pub fn system_with(api: MockApi, page_limit: u32) -> ResourceSystem {
    ResourceSystem::new(Arc::new(api), policy(page_limit)).unwrap()
}

pub fn agent() -> Agent {
    serde_json::from_value(json!({
        "accountId": "acc-1",
        "symbol": "NOVA",
        "headquarters": "X1-AB-A1",
        "credits": 175000,
        "startingFaction": "COSMIC",
        "shipCount": 2
    }))
    .unwrap()
}

pub fn ship(symbol: &str, status: &str, remaining_seconds: i64) -> Ship {
    serde_json::from_value(json!({
        "symbol": symbol,
        "registration": { "name": symbol, "factionSymbol": "COSMIC", "role": "EXCAVATOR" },
        "nav": {
            "systemSymbol": "X1-AB",
            "waypointSymbol": "X1-AB-A1",
            "status": status,
            "flightMode": "CRUISE",
            "route": { "arrival": "2026-03-01T12:00:00Z" }
        },
        "fuel": { "current": 300, "capacity": 400 },
        "cargo": {
            "capacity": 40,
            "units": 10,
            "inventory": [{ "symbol": "IRON_ORE", "name": "Iron Ore", "description": "", "units": 10 }]
        },
        "cooldown": {
            "shipSymbol": symbol,
            "totalSeconds": remaining_seconds.max(0),
            "remainingSeconds": remaining_seconds
        },
        "frame": { "symbol": "FRAME_MINER" },
        "modules": [],
        "mounts": [{ "symbol": "MOUNT_MINING_LASER_I" }]
    }))
    .unwrap()
}

pub fn cooldown(ship_symbol: &str, total: i64, remaining: i64) -> Cooldown {
    serde_json::from_value(json!({
        "shipSymbol": ship_symbol,
        "totalSeconds": total,
        "remainingSeconds": remaining,
        "expiration": "2026-03-01T12:01:30Z"
    }))
    .unwrap()
}

pub fn contract(id: &str, accepted: bool, fulfilled: bool, deadline: DateTime<Utc>) -> Contract {
    serde_json::from_value(json!({
        "id": id,
        "factionSymbol": "COSMIC",
        "type": "PROCUREMENT",
        "terms": {
            "deadline": deadline,
            "payment": { "onAccepted": 1200, "onFulfilled": 9000 },
            "deliver": [{
                "tradeSymbol": "IRON_ORE",
                "destinationSymbol": "X1-AB-A1",
                "unitsRequired": 50,
                "unitsFulfilled": 20
            }]
        },
        "accepted": accepted,
        "fulfilled": fulfilled,
        "deadlineToAccept": deadline
    }))
    .unwrap()
}

pub fn system(symbol: &str) -> System {
    serde_json::from_value(json!({
        "symbol": symbol,
        "sectorSymbol": "X1",
        "type": "RED_STAR",
        "x": 10,
        "y": -4,
        "waypoints": [{ "symbol": format!("{symbol}-A1"), "type": "PLANET", "x": 1, "y": 2 }],
        "factions": [{ "symbol": "COSMIC" }]
    }))
    .unwrap()
}

pub fn waypoint(system_symbol: &str, symbol: &str) -> Waypoint {
    serde_json::from_value(json!({
        "symbol": symbol,
        "type": "ASTEROID",
        "systemSymbol": system_symbol,
        "x": 3,
        "y": 7,
        "traits": [{ "symbol": "MARKETPLACE", "name": "Marketplace", "description": "" }],
        "isUnderConstruction": false
    }))
    .unwrap()
}

pub fn market(symbol: &str) -> Market {
    serde_json::from_value(json!({
        "symbol": symbol,
        "exports": [{ "symbol": "IRON", "name": "Iron", "description": "" }],
        "imports": [{ "symbol": "IRON_ORE", "name": "Iron Ore", "description": "" }],
        "exchange": [],
        "tradeGoods": [{
            "symbol": "IRON_ORE",
            "type": "IMPORT",
            "tradeVolume": 60,
            "supply": "SCARCE",
            "purchasePrice": 52,
            "sellPrice": 48
        }]
    }))
    .unwrap()
}

pub fn shipyard(symbol: &str) -> Shipyard {
    serde_json::from_value(json!({
        "symbol": symbol,
        "shipTypes": [{ "type": "SHIP_PROBE" }, { "type": "SHIP_MINING_DRONE" }],
        "modificationsFee": 100
    }))
    .unwrap()
}

/// A small universe: an agent, three ships (one cooling down), two contracts,
/// five systems and seven waypoints in `X1-AB`.
pub fn universe() -> MockApi {
    let waypoints = (1..=7).map(|i| waypoint("X1-AB", &format!("X1-AB-B{i}"))).collect();
    MockApi::new()
        .with_agent(agent())
        .with_ships(vec![
            ship("NOVA-1", "DOCKED", 0),
            ship("NOVA-2", "IN_ORBIT", 90),
            ship("NOVA-3", "IN_TRANSIT", -4),
        ])
        .with_cooldown(cooldown("NOVA-2", 90, 90))
        .with_contracts(vec![
            contract("c-open", true, false, now() + chrono::Duration::seconds(3725)),
            contract("c-late", true, false, now() - chrono::Duration::hours(1)),
        ])
        .with_systems(["X1-AB", "X1-CD", "X1-EF", "X1-GH", "X1-IJ"].into_iter().map(system).collect())
        .with_waypoints("X1-AB", waypoints)
        .with_market(market("X1-AB-B1"))
        .with_shipyard(shipyard("X1-AB-B2"))
}
