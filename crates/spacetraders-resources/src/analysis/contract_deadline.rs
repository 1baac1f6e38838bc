use crate::analysis::cooldown::format_duration;
use crate::model::Contract;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractState {
    Open,
    Fulfilled,
    Expired,
}

/// A contract plus how much time is left on the deadline that currently applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDeadlineView {
    pub contract: Contract,
    pub state: ContractState,
    pub deadline: DateTime<Utc>,
    /// Never negative; `0` once the deadline has passed.
    pub seconds_to_deadline: i64,
    pub deadline_display: String,
    pub units_required: u32,
    pub units_fulfilled: u32,
}

impl ContractDeadlineView {
    /// Evaluates `contract` against `now`. The clock is injected so the view is pure.
    pub fn analyze(contract: Contract, now: DateTime<Utc>) -> Self {
        let deadline = contract.active_deadline();
        let seconds = (deadline - now).num_seconds().max(0);

        let state = if contract.fulfilled {
            ContractState::Fulfilled
        } else if deadline <= now {
            ContractState::Expired
        } else {
            ContractState::Open
        };

        let display = match state {
            ContractState::Fulfilled => "Fulfilled".to_string(),
            ContractState::Expired => "Expired".to_string(),
            ContractState::Open => format_duration(seconds),
        };

        let (units_required, units_fulfilled) = contract
            .terms
            .deliver
            .iter()
            .fold((0, 0), |(req, done), d| (req + d.units_required, done + d.units_fulfilled));

        Self {
            contract,
            state,
            deadline,
            seconds_to_deadline: seconds,
            deadline_display: display,
            units_required,
            units_fulfilled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContractDelivery, ContractPayment, ContractTerms};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn contract(accepted: bool, fulfilled: bool, deadline: DateTime<Utc>, accept_by: DateTime<Utc>) -> Contract {
        Contract {
            id: "c-1".into(),
            faction_symbol: "COSMIC".into(),
            kind: "PROCUREMENT".into(),
            terms: ContractTerms {
                deadline,
                payment: ContractPayment {
                    on_accepted: 1000,
                    on_fulfilled: 5000,
                },
                deliver: vec![
                    ContractDelivery {
                        trade_symbol: "IRON_ORE".into(),
                        destination_symbol: "X1-AB-A1".into(),
                        units_required: 30,
                        units_fulfilled: 12,
                    },
                    ContractDelivery {
                        trade_symbol: "COPPER_ORE".into(),
                        destination_symbol: "X1-AB-A1".into(),
                        units_required: 10,
                        units_fulfilled: 0,
                    },
                ],
            },
            accepted,
            fulfilled,
            deadline_to_accept: Some(accept_by),
            expiration: Some(accept_by),
        }
    }

    #[test]
    fn accepted_contract_counts_down_to_delivery_deadline() {
        let c = contract(true, false, now() + Duration::seconds(3725), now() - Duration::days(1));
        let view = ContractDeadlineView::analyze(c, now());
        assert_eq!(view.state, ContractState::Open);
        assert_eq!(view.seconds_to_deadline, 3725);
        assert_eq!(view.deadline_display, "1h 2m 5s");
        assert_eq!((view.units_required, view.units_fulfilled), (40, 12));
    }

    #[test]
    fn offered_contract_uses_acceptance_deadline() {
        let c = contract(false, false, now() + Duration::days(7), now() + Duration::seconds(90));
        let view = ContractDeadlineView::analyze(c, now());
        assert_eq!(view.seconds_to_deadline, 90);
        assert_eq!(view.deadline_display, "1m 30s");
    }

    #[test]
    fn past_deadline_is_expired() {
        let c = contract(true, false, now() - Duration::seconds(1), now() - Duration::days(1));
        let view = ContractDeadlineView::analyze(c, now());
        assert_eq!(view.state, ContractState::Expired);
        assert_eq!(view.seconds_to_deadline, 0);
        assert_eq!(view.deadline_display, "Expired");
    }

    #[test]
    fn fulfilled_wins_over_expired() {
        let c = contract(true, true, now() - Duration::days(2), now() - Duration::days(3));
        let view = ContractDeadlineView::analyze(c, now());
        assert_eq!(view.state, ContractState::Fulfilled);
        assert_eq!(view.deadline_display, "Fulfilled");
    }
}
