use serde::{Deserialize, Serialize};

/// A marketplace at a waypoint.
///
/// `trade_goods` is only reported while one of the agent's ships is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub symbol: String,
    #[serde(default)]
    pub exports: Vec<TradeGood>,
    #[serde(default)]
    pub imports: Vec<TradeGood>,
    #[serde(default)]
    pub exchange: Vec<TradeGood>,
    #[serde(default)]
    pub trade_goods: Option<Vec<MarketTradeGood>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeGood {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTradeGood {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub trade_volume: u32,
    pub supply: String,
    pub purchase_price: i64,
    pub sell_price: i64,
}
