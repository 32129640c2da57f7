//! Background live-score polling.
//!
//! A [`ScorePoller`] owns a background task that fetches the score of
//! every watched match each interval and publishes the whole map over a
//! watch channel. Each publish replaces the previous map wholesale, so
//! subscribers always see one coherent snapshot; a match whose fetch
//! failed is present with an [`ScoreEntry::Unavailable`] entry rather
//! than being dropped.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::rest::HttpClient;
use crate::types::MatchScore;

/// Latest score snapshot per match id.
pub type ScoreMap = HashMap<i64, ScoreEntry>;

#[derive(Debug, Clone)]
pub enum ScoreEntry {
    Live(MatchScore),
    /// The last fetch for this match failed; holds the error text.
    Unavailable(String),
}

impl ScoreEntry {
    pub fn score(&self) -> Option<&MatchScore> {
        match self {
            ScoreEntry::Live(score) => Some(score),
            ScoreEntry::Unavailable(_) => None,
        }
    }
}

/// Handle to a running score-polling task.
pub struct ScorePoller {
    scores_rx: watch::Receiver<ScoreMap>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ScorePoller {
    /// Start polling the given matches. The first snapshot is fetched
    /// immediately; subsequent ones every `interval`.
    pub fn spawn(http: HttpClient, match_ids: Vec<i64>, interval: Duration) -> Self {
        let (tx, scores_rx) = watch::channel(ScoreMap::new());
        let cancel = CancellationToken::new();
        let task = tokio::spawn(poll_loop(http, match_ids, interval, tx, cancel.clone()));
        Self {
            scores_rx,
            cancel,
            task: Some(task),
        }
    }

    /// Subscribe to score snapshots. Every published map is visible as a
    /// change to the receiver.
    pub fn subscribe(&self) -> watch::Receiver<ScoreMap> {
        self.scores_rx.clone()
    }

    /// Clone of the most recently published snapshot.
    pub fn latest(&self) -> ScoreMap {
        self.scores_rx.borrow().clone()
    }

    /// Stop the poller and wait for the background task to finish.
    /// No fetches are issued after this returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ScorePoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    http: HttpClient,
    match_ids: Vec<i64>,
    interval: Duration,
    tx: watch::Sender<ScoreMap>,
    cancel: CancellationToken,
) {
    tracing::debug!(matches = match_ids.len(), ?interval, "score poller started");

    let map = fetch_all(&http, &match_ids).await;
    let _ = tx.send(map);

    let mut ticker = interval_at(Instant::now() + interval, interval);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("score poller stopped");
                return;
            }
            _ = ticker.tick() => {
                let map = fetch_all(&http, &match_ids).await;
                let _ = tx.send(map);
            }
        }
    }
}

/// Fetch every match concurrently, capturing failures per entry.
async fn fetch_all(http: &HttpClient, match_ids: &[i64]) -> ScoreMap {
    let fetches = match_ids.iter().map(|&match_id| async move {
        (match_id, http.match_score(match_id).await)
    });
    futures_util::future::join_all(fetches)
        .await
        .into_iter()
        .map(|(match_id, result)| {
            let entry = match result {
                Ok(score) => ScoreEntry::Live(score),
                Err(e) => {
                    tracing::warn!(match_id, error = %e, "score fetch failed");
                    ScoreEntry::Unavailable(e.to_string())
                }
            };
            (match_id, entry)
        })
        .collect()
}
