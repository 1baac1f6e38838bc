//! # In-memory API
//!
//! `MockApi` implements [`SpaceTradersApi`] from fixtures held in memory. Collections
//! are sliced into pages exactly like the remote does, unknown symbols answer `404`,
//! and any `(endpoint, page)` pair can be scripted to fail. Every call is recorded.
//!
//! ```rust
//! use spacetraders_resources::api::{MockApi, SpaceTradersApi};
//! use resource_framework::FetchError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockApi::new().fail_on(
//!         "/systems",
//!         Some(2),
//!         FetchError::RemoteStatus {
//!             endpoint: "/systems".into(),
//!             page: Some(2),
//!             status: 429,
//!             message: "rate limited".into(),
//!         },
//!     );
//!
//!     assert!(api.systems_page(1, 20).await.is_ok());
//!     assert!(api.systems_page(2, 20).await.is_err());
//!     assert_eq!(api.calls(), ["/systems?page=1", "/systems?page=2"]);
//! }
//! ```

use crate::api::{endpoints, SpaceTradersApi};
use crate::model::{Agent, Contract, Cooldown, Market, Ship, Shipyard, System, Waypoint};
use async_trait::async_trait;
use resource_framework::mock::page_of;
use resource_framework::{FetchError, Page};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Fixture-backed stand-in for the remote API.
#[derive(Clone, Default)]
pub struct MockApi {
    agent: Option<Agent>,
    ships: Vec<Ship>,
    cooldowns: HashMap<String, Cooldown>,
    contracts: Vec<Contract>,
    systems: Vec<System>,
    waypoints: HashMap<String, Vec<Waypoint>>,
    markets: HashMap<String, Market>,
    shipyards: HashMap<String, Shipyard>,
    failures: HashMap<(String, Option<u32>), FetchError>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    pub fn with_ships(mut self, ships: Vec<Ship>) -> Self {
        self.ships = ships;
        self
    }

    /// An active cooldown for one ship. Ships without one answer "no cooldown".
    pub fn with_cooldown(mut self, cooldown: Cooldown) -> Self {
        self.cooldowns.insert(cooldown.ship_symbol.clone(), cooldown);
        self
    }

    pub fn with_contracts(mut self, contracts: Vec<Contract>) -> Self {
        self.contracts = contracts;
        self
    }

    pub fn with_systems(mut self, systems: Vec<System>) -> Self {
        self.systems = systems;
        self
    }

    pub fn with_waypoints(mut self, system_symbol: &str, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints.insert(system_symbol.to_string(), waypoints);
        self
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.markets.insert(market.symbol.clone(), market);
        self
    }

    pub fn with_shipyard(mut self, shipyard: Shipyard) -> Self {
        self.shipyards.insert(shipyard.symbol.clone(), shipyard);
        self
    }

    /// Makes the call to `endpoint` (at `page`, for collections) return `error`.
    pub fn fail_on(mut self, endpoint: &str, page: Option<u32>, error: FetchError) -> Self {
        self.failures.insert((endpoint.to_string(), page), error);
        self
    }

    /// Every call so far, as `endpoint` or `endpoint?page=N`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &str, page: Option<u32>) -> Result<(), FetchError> {
        let call = match page {
            Some(page) => format!("{endpoint}?page={page}"),
            None => endpoint.to_string(),
        };
        self.calls.lock().unwrap().push(call);
        match self.failures.get(&(endpoint.to_string(), page)) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn paged<T: Clone>(&self, endpoint: &str, items: &[T], page: u32, limit: u32) -> Result<Page<T>, FetchError> {
        self.record(endpoint, Some(page))?;
        Ok(page_of(items, page, limit))
    }

    fn found<T: Clone>(&self, endpoint: &str, entity: Option<&T>) -> Result<T, FetchError> {
        self.record(endpoint, None)?;
        entity.cloned().ok_or_else(|| not_found(endpoint))
    }
}

fn not_found(endpoint: &str) -> FetchError {
    FetchError::RemoteStatus {
        endpoint: endpoint.to_string(),
        page: None,
        status: 404,
        message: "not found".to_string(),
    }
}

#[async_trait]
impl SpaceTradersApi for MockApi {
    async fn agent(&self) -> Result<Agent, FetchError> {
        self.found(endpoints::AGENT, self.agent.as_ref())
    }

    async fn ships_page(&self, page: u32, limit: u32) -> Result<Page<Ship>, FetchError> {
        self.paged(endpoints::SHIPS, &self.ships, page, limit)
    }

    async fn ship(&self, ship_symbol: &str) -> Result<Ship, FetchError> {
        let ship = self.ships.iter().find(|s| s.symbol == ship_symbol);
        self.found(&endpoints::ship(ship_symbol), ship)
    }

    async fn ship_cooldown(&self, ship_symbol: &str) -> Result<Option<Cooldown>, FetchError> {
        let endpoint = endpoints::ship_cooldown(ship_symbol);
        self.record(&endpoint, None)?;
        if !self.ships.iter().any(|s| s.symbol == ship_symbol) {
            return Err(not_found(&endpoint));
        }
        Ok(self.cooldowns.get(ship_symbol).cloned())
    }

    async fn contracts_page(&self, page: u32, limit: u32) -> Result<Page<Contract>, FetchError> {
        self.paged(endpoints::CONTRACTS, &self.contracts, page, limit)
    }

    async fn systems_page(&self, page: u32, limit: u32) -> Result<Page<System>, FetchError> {
        self.paged(endpoints::SYSTEMS, &self.systems, page, limit)
    }

    async fn system(&self, system_symbol: &str) -> Result<System, FetchError> {
        let system = self.systems.iter().find(|s| s.symbol == system_symbol);
        self.found(&endpoints::system(system_symbol), system)
    }

    async fn waypoints_page(&self, system_symbol: &str, page: u32, limit: u32) -> Result<Page<Waypoint>, FetchError> {
        let endpoint = endpoints::waypoints(system_symbol);
        match self.waypoints.get(system_symbol) {
            Some(waypoints) => self.paged(&endpoint, waypoints, page, limit),
            None => {
                self.record(&endpoint, Some(page))?;
                Err(not_found(&endpoint))
            }
        }
    }

    async fn market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, FetchError> {
        self.found(
            &endpoints::market(system_symbol, waypoint_symbol),
            self.markets.get(waypoint_symbol),
        )
    }

    async fn shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Shipyard, FetchError> {
        self.found(
            &endpoints::shipyard(system_symbol, waypoint_symbol),
            self.shipyards.get(waypoint_symbol),
        )
    }
}
