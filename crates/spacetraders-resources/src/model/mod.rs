//! Wire-level data structures (DTOs) decoded from the SpaceTraders API.
//!
//! Field names follow the remote's camelCase JSON. Unknown fields are ignored so
//! additions on the remote side never break decoding.

pub mod agent;
pub mod contract;
pub mod cooldown;
pub mod market;
pub mod ship;
pub mod shipyard;
pub mod system;

pub use agent::*;
pub use contract::*;
pub use cooldown::*;
pub use market::*;
pub use ship::*;
pub use shipyard::*;
pub use system::*;
