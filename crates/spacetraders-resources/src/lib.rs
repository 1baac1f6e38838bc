//! # SpaceTraders Resources
//!
//! Exposes the SpaceTraders game API as addressable, read-only resources. A client
//! names what it wants with a `spacetraders://` identifier and gets back one typed,
//! fully aggregated payload.
//!
//! ## Core Components
//!
//! - **[model]**: Wire-level records decoded from the remote API.
//! - **[api]**: The [`SpaceTradersApi`](api::SpaceTradersApi) contract, its HTTP
//!   implementation and an in-memory mock.
//! - **[analysis]**: Pure derived state (cooldown classification, ship status, contract
//!   deadlines).
//! - **[handlers]**: One resource handler per identifier template, and the route table.
//! - **[lifecycle]**: Configuration and the [`ResourceSystem`](lifecycle::ResourceSystem)
//!   that ties it all together.
//!
//! ## Quick Start
//!
//! ```rust
//! use spacetraders_resources::api::MockApi;
//! use spacetraders_resources::handlers::ResourcePayload;
//! use spacetraders_resources::lifecycle::ResourceSystem;
//! use resource_framework::FetchPolicy;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = ResourceSystem::new(Arc::new(MockApi::new()), FetchPolicy::default()).unwrap();
//!
//!     let systems = system.read("spacetraders://systems").await.unwrap();
//!     assert!(matches!(systems, ResourcePayload::Systems(ref all) if all.is_empty()));
//!
//!     assert!(system.read("spacetraders://bogus/thing").await.is_err());
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod handlers;
pub mod lifecycle;
pub mod model;
