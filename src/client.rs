use crate::config::CricbetConfig;
use crate::error::Result;
use crate::poll::ScorePoller;
use crate::rest::HttpClient;
use crate::session::{SessionStore, TokenStore};
use crate::types::*;

/// Main Cricbet client for interacting with the platform.
#[derive(Debug, Clone)]
pub struct Cricbet {
    config: CricbetConfig,
    session: SessionStore,
    http: HttpClient,
}

impl Cricbet {
    /// Create a client with an in-memory session.
    pub fn new(config: CricbetConfig) -> Result<Self> {
        Self::with_token_store(config, SessionStore::in_memory())
    }

    /// Create a client whose session persists through the given store,
    /// resuming any previously saved token pair.
    pub fn with_persisted_session(
        config: CricbetConfig,
        store: Box<dyn TokenStore>,
    ) -> Result<Self> {
        Self::with_token_store(config, SessionStore::new(store))
    }

    fn with_token_store(config: CricbetConfig, session: SessionStore) -> Result<Self> {
        let http = HttpClient::new(&config.base_url, session.clone(), config.request_timeout)?;
        Ok(Self {
            config,
            session,
            http,
        })
    }

    pub fn config(&self) -> &CricbetConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // --- Score polling ---

    /// Fetch the match listing and start polling scores for every match.
    pub async fn poll_all_scores(&self) -> Result<ScorePoller> {
        let matches = self.http.matches().await?;
        let ids = matches.iter().map(|m| m.match_id).collect();
        Ok(ScorePoller::spawn(
            self.http.clone(),
            ids,
            self.config.listing_poll_interval,
        ))
    }

    /// Start polling the score of a single match at the detail cadence.
    pub fn poll_match(&self, match_id: i64) -> ScorePoller {
        ScorePoller::spawn(
            self.http.clone(),
            vec![match_id],
            self.config.detail_poll_interval,
        )
    }

    // --- REST delegates ---

    /// Get the full match listing.
    pub async fn matches(&self) -> Result<Vec<MatchInfo>> {
        self.http.matches().await
    }

    /// Get the live score snapshot for one match.
    pub async fn match_score(&self, match_id: i64) -> Result<MatchScore> {
        self.http.match_score(match_id).await
    }
}
