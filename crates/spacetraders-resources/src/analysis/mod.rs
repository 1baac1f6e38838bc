//! Derived state computed from raw remote records.
//!
//! Everything here is pure: no I/O, no clock reads (the current time is passed in),
//! and no error path.

pub mod contract_deadline;
pub mod cooldown;
pub mod ship_status;

pub use contract_deadline::{ContractDeadlineView, ContractState};
pub use cooldown::{
    classify, format_duration, CooldownPriority, CooldownStatus, CooldownView, ACTION_OPERATIONS,
    NAVIGATION_OPERATIONS,
};
pub use ship_status::{FleetSummary, ShipStatusView};
