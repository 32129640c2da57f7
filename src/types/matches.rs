use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the `GET /matches/` listing.
///
/// The backend serializes every column of its match table; only the
/// fields the client renders are typed here, the rest land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: i64,
    pub match_name: String,
    #[serde(rename = "Team1")]
    pub team1: String,
    #[serde(rename = "Team2")]
    pub team2: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Scraped live-score snapshot from `GET /match-score/{id}/`.
///
/// Everything is stringly typed at the source (odds use sentinel values
/// like `"00"` when suspended), so the fields stay `Option<String>` and
/// unknown keys are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(default)]
    pub match_name: Option<String>,
    #[serde(default)]
    pub team1: Option<String>,
    #[serde(default)]
    pub team2: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub over: Option<String>,
    #[serde(default)]
    pub odd_1: Option<String>,
    #[serde(default)]
    pub odd_2: Option<String>,
    #[serde(default)]
    pub fav_team: Option<String>,
    #[serde(default)]
    pub main_message: Option<String>,
    #[serde(default)]
    pub batsman_1: Option<String>,
    #[serde(default)]
    pub batsman_1_score: Option<String>,
    #[serde(default)]
    pub batsman_2: Option<String>,
    #[serde(default)]
    pub batsman_2_score: Option<String>,
    #[serde(default)]
    pub bowler: Option<String>,
    #[serde(default)]
    pub bowler_score: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// `POST /bets/place/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceBetRequest {
    pub match_id: i64,
    pub selected_team: String,
    pub odds: i64,
    pub stake: Decimal,
}

/// `POST /contact/` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub message: String,
}
