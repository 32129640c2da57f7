use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `POST /generate-otp/` body for deposits. Withdrawals send no body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOtpRequest {
    pub amount: Decimal,
}

/// `POST /generate-otp/` response. The OTP is echoed back so the
/// client can surface it; delivery channels are out of scope here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOtpResponse {
    pub message: String,
    pub otp: u32,
}

/// Body for OTP verification and rejection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpVerifyRequest {
    pub amount: Decimal,
    pub otp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Completed,
    Rejected,
    Failed,
}

/// Display bucket for a request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Approved,
    Rejected,
    Pending,
}

impl RequestStatus {
    pub fn badge(self) -> StatusBadge {
        match self {
            RequestStatus::Approved | RequestStatus::Completed => StatusBadge::Approved,
            RequestStatus::Rejected | RequestStatus::Failed => StatusBadge::Rejected,
            RequestStatus::Pending => StatusBadge::Pending,
        }
    }
}

/// One row of `GET /deposit/history/` or `GET /withdraw/history/`.
///
/// `created_at` arrives pre-formatted for display, not as an ISO date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRequestRecord {
    pub id: i64,
    pub amount: Decimal,
    pub status: RequestStatus,
    pub created_at: String,
    pub transaction_id: String,
}
