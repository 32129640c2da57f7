//! OTP-guarded deposit and withdrawal flows.
//!
//! Both money movements share one state machine: collect an amount,
//! generate an OTP, then verify it within a bounded number of attempts
//! and a fixed time window. The countdown is driven by explicit
//! [`OtpFlow::tick`] calls so its behavior is deterministic; a wall-clock
//! driver is provided in [`OtpFlow::run_countdown`].

use rust_decimal::Decimal;
use tokio::time::{interval_at, Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{CricbetError, Result};
use crate::rest::HttpClient;
use crate::types::{FundRequestRecord, GenerateOtpResponse};

/// Verification window, in seconds.
pub const OTP_TTL_SECS: u32 = 300;
/// Verification attempts per generated OTP.
pub const OTP_MAX_ATTEMPTS: u8 = 3;

const DEPOSIT_MIN: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const DEPOSIT_MAX: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const WITHDRAW_MIN: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const WITHDRAW_MAX: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Deposit,
    Withdraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// No OTP outstanding; waiting for an amount.
    CollectingAmount,
    /// OTP generated; counting down and accepting verification attempts.
    AwaitingOtp,
    /// All attempts burned; terminal until [`OtpFlow::try_again`].
    Rejected,
}

/// Resolution of a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpOutcome {
    /// The server accepted the OTP and queued the request for approval.
    Completed { message: String },
    /// The server rejected the OTP; attempts remain.
    Denied {
        attempts_remaining: u8,
        message: String,
    },
    /// The last attempt was rejected; the request was recorded as rejected.
    Rejected,
}

/// One OTP-guarded deposit or withdrawal flow.
pub struct OtpFlow {
    http: HttpClient,
    kind: FlowKind,
    stage: Stage,
    amount: Option<Decimal>,
    attempts_remaining: u8,
    seconds_remaining: u32,
    /// Withdrawals cannot exceed this; `None` skips the check.
    balance_limit: Option<Decimal>,
    history: Vec<FundRequestRecord>,
}

impl OtpFlow {
    /// Open a flow and load its request history. A history fetch failure
    /// is logged and leaves the history empty; the flow is still usable.
    pub async fn open(http: HttpClient, kind: FlowKind, balance_limit: Option<Decimal>) -> Self {
        let mut flow = Self::new(http, kind, balance_limit);
        flow.refresh_history().await;
        flow
    }

    fn new(http: HttpClient, kind: FlowKind, balance_limit: Option<Decimal>) -> Self {
        Self {
            http,
            kind,
            stage: Stage::CollectingAmount,
            amount: None,
            attempts_remaining: OTP_MAX_ATTEMPTS,
            seconds_remaining: OTP_TTL_SECS,
            balance_limit,
            history: Vec::new(),
        }
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn history(&self) -> &[FundRequestRecord] {
        &self.history
    }

    /// Validate the amount and request an OTP for it.
    ///
    /// On success the flow moves to [`Stage::AwaitingOtp`] with a full
    /// attempt budget and a fresh countdown.
    pub async fn submit_amount(&mut self, amount: Decimal) -> Result<GenerateOtpResponse> {
        if self.stage != Stage::CollectingAmount {
            return Err(CricbetError::Validation(
                "an OTP is already outstanding".to_string(),
            ));
        }
        validate_amount(self.kind, amount, self.balance_limit)?;

        let body_amount = match self.kind {
            FlowKind::Deposit => Some(amount),
            FlowKind::Withdraw => None,
        };
        let resp = self.http.generate_otp(body_amount).await?;

        self.stage = Stage::AwaitingOtp;
        self.amount = Some(amount);
        self.attempts_remaining = OTP_MAX_ATTEMPTS;
        self.seconds_remaining = OTP_TTL_SECS;
        Ok(resp)
    }

    /// Submit an OTP for verification.
    ///
    /// Protocol-level resolutions come back as `Ok(OtpOutcome)`: acceptance
    /// completes the flow, a rejection burns an attempt, and burning the
    /// last attempt records the request as rejected server-side and parks
    /// the flow in [`Stage::Rejected`]. Transport and session errors are
    /// returned as `Err` without consuming an attempt.
    pub async fn submit_otp(&mut self, otp: &str) -> Result<OtpOutcome> {
        if self.stage != Stage::AwaitingOtp {
            return Err(CricbetError::Validation(
                "no OTP verification in progress".to_string(),
            ));
        }
        let amount = self.amount.ok_or_else(|| {
            CricbetError::Validation("no amount recorded for this flow".to_string())
        })?;

        let result = match self.kind {
            FlowKind::Deposit => self.http.verify_deposit(amount, otp).await,
            FlowKind::Withdraw => self.http.request_withdrawal(amount, otp).await,
        };

        match result {
            Ok(resp) => {
                self.reset();
                self.refresh_history().await;
                Ok(OtpOutcome::Completed {
                    message: resp.message,
                })
            }
            Err(CricbetError::Http { message, .. }) => {
                self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
                if self.attempts_remaining == 0 {
                    let reject = match self.kind {
                        FlowKind::Deposit => self.http.reject_deposit(amount, otp).await,
                        FlowKind::Withdraw => self.http.reject_withdrawal(amount, otp).await,
                    };
                    if let Err(e) = reject {
                        tracing::warn!(error = %e, "failed to record rejected request");
                    }
                    self.stage = Stage::Rejected;
                    self.refresh_history().await;
                    Ok(OtpOutcome::Rejected)
                } else {
                    Ok(OtpOutcome::Denied {
                        attempts_remaining: self.attempts_remaining,
                        message: format!(
                            "{message} You have {} attempts remaining.",
                            self.attempts_remaining
                        ),
                    })
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Advance the countdown by one second. Returns `true` when the window
    /// expires, which restarts the flow from [`Stage::CollectingAmount`].
    /// A no-op outside [`Stage::AwaitingOtp`].
    pub fn tick(&mut self) -> bool {
        if self.stage != Stage::AwaitingOtp {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            tracing::info!(kind = ?self.kind, "OTP window expired, restarting flow");
            self.reset();
            true
        } else {
            false
        }
    }

    /// Drive the countdown on wall-clock seconds until it expires, the
    /// flow leaves [`Stage::AwaitingOtp`], or `cancel` fires. Returns
    /// `true` if the window timed out.
    pub async fn run_countdown(&mut self, cancel: &CancellationToken) -> bool {
        let second = Duration::from_secs(1);
        let mut ticker = interval_at(Instant::now() + second, second);
        while self.stage == Stage::AwaitingOtp {
            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = ticker.tick() => {
                    if self.tick() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Restart a rejected flow with fresh defaults.
    pub fn try_again(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.stage = Stage::CollectingAmount;
        self.amount = None;
        self.attempts_remaining = OTP_MAX_ATTEMPTS;
        self.seconds_remaining = OTP_TTL_SECS;
    }

    /// Reload the request history, keeping the old one on failure.
    pub async fn refresh_history(&mut self) {
        let result = match self.kind {
            FlowKind::Deposit => self.http.deposit_history().await,
            FlowKind::Withdraw => self.http.withdrawal_history().await,
        };
        match result {
            Ok(history) => self.history = history,
            Err(e) => tracing::warn!(kind = ?self.kind, error = %e, "history fetch failed"),
        }
    }
}

fn validate_amount(kind: FlowKind, amount: Decimal, balance_limit: Option<Decimal>) -> Result<()> {
    let (min, max) = match kind {
        FlowKind::Deposit => (DEPOSIT_MIN, DEPOSIT_MAX),
        FlowKind::Withdraw => (WITHDRAW_MIN, WITHDRAW_MAX),
    };
    if amount < min || amount > max {
        return Err(CricbetError::Validation(format!(
            "amount must be between {min} and {max}"
        )));
    }
    if kind == FlowKind::Withdraw {
        if let Some(balance) = balance_limit {
            if amount > balance {
                return Err(CricbetError::Validation(format!(
                    "insufficient funds: available balance is {balance}"
                )));
            }
        }
    }
    Ok(())
}
