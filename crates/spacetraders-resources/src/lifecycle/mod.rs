//! # System Lifecycle
//!
//! Wires the pieces together: configuration is read once, the remote client and the
//! route table are built once, and [`ResourceSystem`] hands out a fresh
//! [`ApiContext`](crate::handlers::ApiContext) per request.
//!
//! ```rust,no_run
//! use spacetraders_resources::lifecycle::{Config, ResourceSystem};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let system = ResourceSystem::from_config(&Config::from_env()?)?;
//! let agent = system.read("spacetraders://agent/info").await?;
//! println!("{}", serde_json::to_string_pretty(&agent)?);
//! system.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Shutdown
//!
//! `shutdown()` cancels the system's root token. Each request runs on a child of that
//! token, so an aggregation in progress finishes its current page and then returns
//! `FetchError::Cancelled` instead of a partial collection.

pub mod config;
pub mod resource_system;

pub use config::{Config, ConfigError};
pub use resource_system::{ResourceSystem, StartupError};
