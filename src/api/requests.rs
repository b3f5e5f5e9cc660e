use serde::{Deserialize, Serialize};

use super::*;

// Requests
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LoginRequest {
    #[serde(rename = "type")]
    pub login_type: String,
    pub login: String,
    pub password: String,
}
impl LoginRequest {
    pub fn standard(login: &str, password: &str) -> Self {
        Self {
            login_type: "STANDARD_LOGIN".to_string(),
            login: login.to_string(),
            password: password.to_string(),
        }
    }
}
/// One priced combination: bet type, unit stake in cents and the ordered
/// selections it covers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub bet_type: String,
    pub stake: u64,
    pub selections: Vec<MatchSelection>,
}
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WagerRequest {
    pub list_index: u32,
    pub game_name: Game,
    pub price: u64,
    pub boards: Vec<Board>,
}
/// Stakeless dividend lookup. The platform prices these itself, so the
/// payload carries only the selections plus pagination defaults. The game is
/// not part of the document, it selects the URL path instead.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WinshareRequest {
    pub additional_prize_tier: bool,
    pub page: u32,
    pub page_size: u32,
    pub selections: Vec<MatchSelection>,
    #[serde(skip)]
    pub game: Game,
}
