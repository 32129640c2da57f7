pub mod client;
pub mod config;
pub mod error;
pub mod otp;
pub mod poll;
pub mod rest;
pub mod session;
pub mod types;
pub mod user;

// ---- Top-level re-exports for ergonomic usage ----

// Client + user
pub use client::Cricbet;
pub use config::CricbetConfig;
pub use error::{CricbetError, Result};
pub use user::CricbetUser;

// REST client
pub use rest::HttpClient;

// Session + token persistence
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionStore, TokenStore};

// OTP deposit/withdrawal flows
pub use otp::{FlowKind, OtpFlow, OtpOutcome, Stage, OTP_MAX_ATTEMPTS, OTP_TTL_SECS};

// Score polling
pub use poll::{ScoreEntry, ScoreMap, ScorePoller};

// Auth
pub use types::{MessageResponse, TokenPair};

// User data
pub use types::{ExposureResponse, Transaction, TransactionType, UserProfile};

// Matches + betting
pub use types::{MatchInfo, MatchScore, PlaceBetRequest};

// Funds
pub use types::{FundRequestRecord, GenerateOtpResponse, RequestStatus, StatusBadge};

// Casino
pub use types::{
    CasinoBetRecord, CoinFlipResponse, CoinSide, DiceBetResponse, DiceChoice, GameOutcome,
    MinesBetResponse, MinesCashoutResponse, MinesTile,
};
