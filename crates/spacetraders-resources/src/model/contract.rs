use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A faction contract offered to or accepted by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub faction_symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub terms: ContractTerms,
    pub accepted: bool,
    pub fulfilled: bool,
    #[serde(default)]
    pub deadline_to_accept: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    pub deadline: DateTime<Utc>,
    pub payment: ContractPayment,
    #[serde(default)]
    pub deliver: Vec<ContractDelivery>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPayment {
    pub on_accepted: i64,
    pub on_fulfilled: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDelivery {
    pub trade_symbol: String,
    pub destination_symbol: String,
    pub units_required: u32,
    pub units_fulfilled: u32,
}

impl Contract {
    /// The deadline that currently matters: delivery once accepted, acceptance before.
    pub fn active_deadline(&self) -> DateTime<Utc> {
        if self.accepted {
            return self.terms.deadline;
        }
        self.deadline_to_accept
            .or(self.expiration)
            .unwrap_or(self.terms.deadline)
    }
}
