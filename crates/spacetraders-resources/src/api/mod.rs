//! # Remote API
//!
//! [`SpaceTradersApi`] is the contract the handlers depend on: one
//! `(page, limit) -> Page<T>` call per collection endpoint and one plain call per
//! single-entity endpoint. [`HttpApi`](http::HttpApi) talks to the real service;
//! [`MockApi`](mock::MockApi) serves in-memory fixtures for tests.
//!
//! Implementations never retry and never aggregate pages themselves; that is the job
//! of [`fetch_all`](resource_framework::fetch_all).

pub mod http;
pub mod mock;

use crate::model::{Agent, Contract, Cooldown, Market, Ship, Shipyard, System, Waypoint};
use async_trait::async_trait;
use resource_framework::{FetchError, Page};

pub use http::HttpApi;
pub use mock::MockApi;

#[async_trait]
pub trait SpaceTradersApi: Send + Sync {
    async fn agent(&self) -> Result<Agent, FetchError>;

    async fn ships_page(&self, page: u32, limit: u32) -> Result<Page<Ship>, FetchError>;

    async fn ship(&self, ship_symbol: &str) -> Result<Ship, FetchError>;

    /// `None` when the ship has no active cooldown.
    async fn ship_cooldown(&self, ship_symbol: &str) -> Result<Option<Cooldown>, FetchError>;

    async fn contracts_page(&self, page: u32, limit: u32) -> Result<Page<Contract>, FetchError>;

    async fn systems_page(&self, page: u32, limit: u32) -> Result<Page<System>, FetchError>;

    async fn system(&self, system_symbol: &str) -> Result<System, FetchError>;

    async fn waypoints_page(
        &self,
        system_symbol: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<Waypoint>, FetchError>;

    async fn market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, FetchError>;

    async fn shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Shipyard, FetchError>;
}

/// Remote endpoint paths, relative to the API base URL.
///
/// These strings double as the `endpoint` context of every [`FetchError`].
pub mod endpoints {
    use urlencoding::encode;

    pub const AGENT: &str = "/my/agent";
    pub const SHIPS: &str = "/my/ships";
    pub const CONTRACTS: &str = "/my/contracts";
    pub const SYSTEMS: &str = "/systems";

    pub fn ship(ship_symbol: &str) -> String {
        format!("{SHIPS}/{}", encode(ship_symbol))
    }

    pub fn ship_cooldown(ship_symbol: &str) -> String {
        format!("{}/cooldown", ship(ship_symbol))
    }

    pub fn system(system_symbol: &str) -> String {
        format!("{SYSTEMS}/{}", encode(system_symbol))
    }

    pub fn waypoints(system_symbol: &str) -> String {
        format!("{}/waypoints", system(system_symbol))
    }

    pub fn market(system_symbol: &str, waypoint_symbol: &str) -> String {
        format!("{}/{}/market", waypoints(system_symbol), encode(waypoint_symbol))
    }

    pub fn shipyard(system_symbol: &str, waypoint_symbol: &str) -> String {
        format!("{}/{}/shipyard", waypoints(system_symbol), encode(waypoint_symbol))
    }

}
