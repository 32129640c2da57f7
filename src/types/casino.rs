use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_util::decimal_flex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceChoice {
    #[serde(rename = "under")]
    Under,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "over")]
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceBetRequest {
    pub amount: Decimal,
    pub choice: DiceChoice,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceBetResponse {
    pub final_die1: u8,
    pub final_die2: u8,
    pub outcome: GameOutcome,
    #[serde(with = "decimal_flex")]
    pub winnings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinFlipRequest {
    pub amount: Decimal,
    pub choice: CoinSide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinFlipResponse {
    pub outcome: CoinSide,
    #[serde(with = "decimal_flex")]
    pub winnings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesBetRequest {
    pub amount: Decimal,
    pub mines: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesTile {
    pub id: u8,
    #[serde(rename = "isMine")]
    pub is_mine: bool,
    #[serde(rename = "isRevealed")]
    pub is_revealed: bool,
}

/// Freshly dealt mines grid; tiles start unrevealed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesBetResponse {
    pub grid: Vec<MinesTile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesCashoutRequest {
    pub winnings: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesCashoutResponse {
    pub message: String,
    #[serde(with = "decimal_flex")]
    pub new_balance: Decimal,
}

/// One row of `GET /casino/bets/`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasinoBetRecord {
    pub game_name: String,
    #[serde(with = "decimal_flex")]
    pub bet_amount: Decimal,
    #[serde(with = "decimal_flex")]
    pub winnings: Decimal,
    #[serde(with = "decimal_flex")]
    pub multiplier: Decimal,
    pub timestamp: String,
}
