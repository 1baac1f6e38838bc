use crate::analysis::cooldown::CooldownView;
use crate::model::{NavStatus, Ship};
use serde::Serialize;
use std::collections::BTreeMap;

/// A ship together with the state derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipStatusView {
    pub ship: Ship,
    /// `None` for ships without a fuel tank (probes).
    pub fuel_percent: Option<f64>,
    /// `None` for ships without a cargo hold.
    pub cargo_utilization: Option<f64>,
    pub cooldown: CooldownView,
    pub can_act: bool,
}

impl ShipStatusView {
    pub fn from_ship(ship: Ship) -> Self {
        let cooldown = CooldownView::from_record(&ship.cooldown);
        Self {
            fuel_percent: percent(ship.fuel.current, ship.fuel.capacity),
            cargo_utilization: percent(ship.cargo.units, ship.cargo.capacity),
            can_act: cooldown.is_ready(),
            cooldown,
            ship,
        }
    }
}

fn percent(part: u32, whole: u32) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    let value = f64::from(part) / f64::from(whole) * 100.0;
    Some((value * 10.0).round() / 10.0)
}

/// Counts over the whole fleet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub ship_count: usize,
    pub by_nav_status: BTreeMap<NavStatus, usize>,
    pub on_cooldown: usize,
    pub ready: usize,
}

impl FleetSummary {
    pub fn from_ships<'a>(ships: impl IntoIterator<Item = &'a Ship>) -> Self {
        let mut summary = FleetSummary::default();
        for ship in ships {
            summary.ship_count += 1;
            *summary.by_nav_status.entry(ship.nav.status).or_default() += 1;
            if CooldownView::from_record(&ship.cooldown).is_ready() {
                summary.ready += 1;
            } else {
                summary.on_cooldown += 1;
            }
        }
        summary
    }
}
