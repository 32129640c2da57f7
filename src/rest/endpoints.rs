use rust_decimal::Decimal;

use crate::error::Result;
use crate::rest::HttpClient;
use crate::types::*;

impl HttpClient {
    // --- Auth ---

    /// POST /token/ - Exchange credentials for an access/refresh pair.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        self.post(
            "/token/",
            &LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
        )
        .await
    }

    /// POST /register/ - Create a new account.
    pub async fn register(&self, req: &RegisterRequest) -> Result<MessageResponse> {
        self.post("/register/", req).await
    }

    // --- User data ---

    /// GET /user-profile/ - Username and wallet balance.
    pub async fn user_profile(&self) -> Result<UserProfile> {
        self.get("/user-profile/").await
    }

    /// GET /user-exposure/ - Total stake held in open bets.
    pub async fn user_exposure(&self) -> Result<ExposureResponse> {
        self.get("/user-exposure/").await
    }

    /// GET /transaction-history/ - Wallet ledger, newest first.
    pub async fn transaction_history(&self) -> Result<Vec<Transaction>> {
        self.get("/transaction-history/").await
    }

    // --- Matches ---

    /// GET /matches/ - Full match listing.
    pub async fn matches(&self) -> Result<Vec<MatchInfo>> {
        self.get("/matches/").await
    }

    /// GET /match-score/{id}/ - Live score snapshot for one match.
    pub async fn match_score(&self, match_id: i64) -> Result<MatchScore> {
        self.get(&format!("/match-score/{match_id}/")).await
    }

    /// POST /bets/place/ - Place a bet on a match.
    pub async fn place_bet(&self, req: &PlaceBetRequest) -> Result<MessageResponse> {
        self.post("/bets/place/", req).await
    }

    // --- Funds ---

    /// POST /generate-otp/ - Request an OTP; deposits include the amount.
    pub async fn generate_otp(&self, amount: Option<Decimal>) -> Result<GenerateOtpResponse> {
        match amount {
            Some(amount) => {
                self.post("/generate-otp/", &GenerateOtpRequest { amount })
                    .await
            }
            None => self.post_empty("/generate-otp/").await,
        }
    }

    /// POST /deposit/verify/ - Confirm a deposit with its OTP.
    pub async fn verify_deposit(&self, amount: Decimal, otp: &str) -> Result<MessageResponse> {
        self.post(
            "/deposit/verify/",
            &OtpVerifyRequest {
                amount,
                otp: otp.to_string(),
            },
        )
        .await
    }

    /// POST /deposit/reject/ - Record a deposit attempt that ran out of tries.
    pub async fn reject_deposit(&self, amount: Decimal, otp: &str) -> Result<MessageResponse> {
        self.post(
            "/deposit/reject/",
            &OtpVerifyRequest {
                amount,
                otp: otp.to_string(),
            },
        )
        .await
    }

    /// GET /deposit/history/ - Past deposit requests.
    pub async fn deposit_history(&self) -> Result<Vec<FundRequestRecord>> {
        self.get("/deposit/history/").await
    }

    /// POST /withdraw/request/ - Confirm a withdrawal with its OTP.
    pub async fn request_withdrawal(&self, amount: Decimal, otp: &str) -> Result<MessageResponse> {
        self.post(
            "/withdraw/request/",
            &OtpVerifyRequest {
                amount,
                otp: otp.to_string(),
            },
        )
        .await
    }

    /// POST /withdraw/reject/ - Record a withdrawal attempt that ran out of tries.
    pub async fn reject_withdrawal(&self, amount: Decimal, otp: &str) -> Result<MessageResponse> {
        self.post(
            "/withdraw/reject/",
            &OtpVerifyRequest {
                amount,
                otp: otp.to_string(),
            },
        )
        .await
    }

    /// GET /withdraw/history/ - Past withdrawal requests.
    pub async fn withdrawal_history(&self) -> Result<Vec<FundRequestRecord>> {
        self.get("/withdraw/history/").await
    }

    // --- Casino ---

    /// POST /casino/dice/bet/ - Two-dice under/seven/over bet.
    pub async fn dice_bet(&self, req: &DiceBetRequest) -> Result<DiceBetResponse> {
        self.post("/casino/dice/bet/", req).await
    }

    /// POST /casino/coin-flip/bet/ - Heads-or-tails bet.
    pub async fn coin_flip_bet(&self, req: &CoinFlipRequest) -> Result<CoinFlipResponse> {
        self.post("/casino/coin-flip/bet/", req).await
    }

    /// POST /casino/mines/bet/ - Deal a mines grid for the staked amount.
    pub async fn mines_bet(&self, req: &MinesBetRequest) -> Result<MinesBetResponse> {
        self.post("/casino/mines/bet/", req).await
    }

    /// POST /casino/mines/cashout/ - Settle a mines round for its winnings.
    pub async fn mines_cashout(&self, winnings: Decimal) -> Result<MinesCashoutResponse> {
        self.post("/casino/mines/cashout/", &MinesCashoutRequest { winnings })
            .await
    }

    /// POST /casino/mines/loss/ - Record a mines round lost to a mine.
    pub async fn mines_loss(&self) -> Result<MessageResponse> {
        self.post_empty("/casino/mines/loss/").await
    }

    /// GET /bets/casino/ - Casino bet history, newest first.
    pub async fn casino_bets(&self) -> Result<Vec<CasinoBetRecord>> {
        self.get("/bets/casino/").await
    }

    // --- Misc ---

    /// POST /contact/ - Submit a support message.
    pub async fn submit_contact(&self, message: &str) -> Result<MessageResponse> {
        self.post(
            "/contact/",
            &ContactRequest {
                message: message.to_string(),
            },
        )
        .await
    }
}
