use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_util::{decimal_flex, decimal_flex_opt};

/// `GET /user-profile/` response. Balance is null for accounts that
/// have never funded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(with = "decimal_flex_opt", default)]
    pub balance: Option<Decimal>,
}

/// `GET /user-exposure/` response: total stake held in open bets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureResponse {
    #[serde(with = "decimal_flex")]
    pub exposure: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdraw,
    BetPlaced,
    BetWon,
    WithdrawReversal,
}

/// One row of `GET /transaction-history/`, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}
