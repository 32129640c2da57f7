pub mod auth;
pub mod casino;
pub mod funds;
pub mod matches;
pub mod profile;
pub(crate) mod serde_util;

pub use auth::{
    ApiErrorBody, LoginRequest, MessageResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    TokenPair,
};
pub use casino::{
    CasinoBetRecord, CoinFlipRequest, CoinFlipResponse, CoinSide, DiceBetRequest, DiceBetResponse,
    DiceChoice, GameOutcome, MinesBetRequest, MinesBetResponse, MinesCashoutRequest,
    MinesCashoutResponse, MinesTile,
};
pub use funds::{
    FundRequestRecord, GenerateOtpRequest, GenerateOtpResponse, OtpVerifyRequest, RequestStatus,
    StatusBadge,
};
pub use matches::{ContactRequest, MatchInfo, MatchScore, PlaceBetRequest};
pub use profile::{ExposureResponse, Transaction, TransactionType, UserProfile};
