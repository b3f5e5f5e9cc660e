use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountResponse {
    pub balances: Balances,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Balances {
    #[serde(rename = "CASH")]
    pub cash: CashBalance,
}
/// Account funds in minor currency units (cents).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CashBalance {
    pub balance: i64,
    pub frozen_balance: i64,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DrawsResponse {
    pub draws: Vec<Draw>,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Draw {
    pub id: String,
    pub game_name: String,
    pub brand_name: String,
    pub status: String,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWager {
    pub status: WagerStatus,
    pub serial_number: Option<String>,
    pub error: Option<serde_json::Value>,
}
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WagerStatus {
    Accepted,
    Rejected,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WinshareListResponse {
    pub win_shares: Vec<Winshare>,
}
/// One payout tier: its value, how many bets hit it and the board that does.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Winshare {
    pub value: u64,
    pub number_of_bets: u64,
    pub selections: Vec<MatchSelection>,
}
