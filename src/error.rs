use thiserror::Error;

#[derive(Error, Debug)]
pub enum CricbetError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("session expired: {0}")]
    SessionExpired(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, CricbetError>;
