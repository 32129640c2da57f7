use std::sync::Arc;

use rust_decimal::Decimal;

use crate::client::Cricbet;
use crate::error::{CricbetError, Result};
use crate::otp::{FlowKind, OtpFlow, OtpOutcome};
use crate::types::*;

/// User client for the CricBet platform.
///
/// Manages authentication and holds the aggregated account view:
/// profile, exposure, and transaction history. The three feeds are
/// fetched together and committed atomically; a partial result is
/// never observable.
pub struct CricbetUser {
    pub client: Arc<Cricbet>,

    pub user: UserProfile,
    pub exposure: Decimal,
    pub transactions: Vec<Transaction>,
}

impl CricbetUser {
    pub fn new(client: Arc<Cricbet>) -> Self {
        Self {
            client,
            user: UserProfile::default(),
            exposure: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.session().is_logged_in()
    }

    fn check_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(CricbetError::NotLoggedIn)
        }
    }

    /// Exchange credentials for a token pair and load the account view.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let pair = self.client.http().login(username, password).await?;
        self.client.session().login(pair);
        self.fetch_user_data().await
    }

    /// Create a new account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<MessageResponse> {
        self.client
            .http()
            .register(&RegisterRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    /// Drop the session and reset the aggregated view.
    pub fn logout(&mut self) {
        self.client.session().clear();
        self.reset_aggregates();
    }

    fn reset_aggregates(&mut self) {
        self.user = UserProfile::default();
        self.exposure = Decimal::ZERO;
        self.transactions.clear();
    }

    /// Fetch profile, exposure, and transaction history concurrently and
    /// commit all three at once.
    ///
    /// A no-op when no access token is held. If any feed fails, nothing is
    /// committed; by default the session is also cleared (matching the
    /// platform's treat-as-logged-out behavior), which can be disabled via
    /// [`CricbetConfig::logout_on_fetch_failure`].
    ///
    /// [`CricbetConfig::logout_on_fetch_failure`]: crate::config::CricbetConfig
    pub async fn fetch_user_data(&mut self) -> Result<()> {
        if self.client.session().access_token().is_none() {
            return Ok(());
        }

        let http = self.client.http();
        match tokio::try_join!(
            http.user_profile(),
            http.user_exposure(),
            http.transaction_history(),
        ) {
            Ok((profile, exposure, transactions)) => {
                self.user = profile;
                self.exposure = exposure.exposure;
                self.transactions = transactions;
                Ok(())
            }
            Err(e) => {
                if self.client.config().logout_on_fetch_failure {
                    tracing::warn!(error = %e, "user data fetch failed, clearing session");
                    self.client.session().clear();
                    self.reset_aggregates();
                } else {
                    tracing::warn!(error = %e, "user data fetch failed, keeping session");
                }
                Err(e)
            }
        }
    }

    // --- Betting ---

    /// Place a bet and refresh the account view.
    pub async fn place_bet(
        &mut self,
        match_id: i64,
        selected_team: &str,
        odds: i64,
        stake: Decimal,
    ) -> Result<()> {
        self.check_login()?;
        if stake <= Decimal::ZERO {
            return Err(CricbetError::Validation(
                "stake must be positive".to_string(),
            ));
        }
        if let Some(balance) = self.user.balance {
            if stake > balance {
                return Err(CricbetError::Validation(format!(
                    "insufficient balance: available {balance}"
                )));
            }
        }
        self.client
            .http()
            .place_bet(&PlaceBetRequest {
                match_id,
                selected_team: selected_team.to_string(),
                odds,
                stake,
            })
            .await?;
        self.fetch_user_data().await
    }

    // --- Funds ---

    /// Open an OTP-guarded deposit flow.
    pub async fn deposit_flow(&self) -> OtpFlow {
        OtpFlow::open(self.client.http().clone(), FlowKind::Deposit, None).await
    }

    /// Open an OTP-guarded withdrawal flow, bounded by the current balance.
    pub async fn withdraw_flow(&self) -> OtpFlow {
        OtpFlow::open(
            self.client.http().clone(),
            FlowKind::Withdraw,
            self.user.balance,
        )
        .await
    }

    /// Submit an OTP on behalf of a flow; a completed withdrawal also
    /// refreshes the account view, since it moves the balance.
    pub async fn complete_otp(&mut self, flow: &mut OtpFlow, otp: &str) -> Result<OtpOutcome> {
        let outcome = flow.submit_otp(otp).await?;
        if matches!(outcome, OtpOutcome::Completed { .. }) && flow.kind() == FlowKind::Withdraw {
            self.fetch_user_data().await?;
        }
        Ok(outcome)
    }

    // --- Casino ---

    /// Roll the dice: bet on under, exactly, or over seven.
    pub async fn dice_bet(&mut self, amount: Decimal, choice: DiceChoice) -> Result<DiceBetResponse> {
        self.check_login()?;
        let resp = self
            .client
            .http()
            .dice_bet(&DiceBetRequest { amount, choice })
            .await?;
        self.fetch_user_data().await?;
        Ok(resp)
    }

    /// Flip the coin.
    pub async fn coin_flip(&mut self, amount: Decimal, choice: CoinSide) -> Result<CoinFlipResponse> {
        self.check_login()?;
        let resp = self
            .client
            .http()
            .coin_flip_bet(&CoinFlipRequest { amount, choice })
            .await?;
        self.fetch_user_data().await?;
        Ok(resp)
    }

    /// Stake a mines round; the stake is debited when the grid is dealt.
    pub async fn mines_bet(&mut self, amount: Decimal, mines: u8) -> Result<MinesBetResponse> {
        self.check_login()?;
        let resp = self
            .client
            .http()
            .mines_bet(&MinesBetRequest { amount, mines })
            .await?;
        self.fetch_user_data().await?;
        Ok(resp)
    }

    /// Cash out a mines round for its accumulated winnings.
    pub async fn mines_cashout(&mut self, winnings: Decimal) -> Result<MinesCashoutResponse> {
        self.check_login()?;
        let resp = self.client.http().mines_cashout(winnings).await?;
        self.fetch_user_data().await?;
        Ok(resp)
    }

    /// Record a mines round that hit a mine.
    pub async fn mines_loss(&mut self) -> Result<MessageResponse> {
        self.check_login()?;
        let resp = self.client.http().mines_loss().await?;
        self.fetch_user_data().await?;
        Ok(resp)
    }

    /// Casino bet history, newest first.
    pub async fn casino_bets(&self) -> Result<Vec<CasinoBetRecord>> {
        self.check_login()?;
        self.client.http().casino_bets().await
    }

    // --- Misc ---

    /// Submit a support message.
    pub async fn submit_contact(&self, message: &str) -> Result<MessageResponse> {
        self.client.http().submit_contact(message).await
    }
}
