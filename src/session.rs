use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use crate::types::TokenPair;

/// In-memory view of the current authentication state.
///
/// `is_logged_in` is derived: the session counts as logged in exactly
/// when an access token is present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Pluggable persistence for the token pair.
///
/// Persistence failures are logged, never surfaced: the in-memory
/// session stays authoritative for the lifetime of the process.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<TokenPair>;
    fn save(&self, pair: &TokenPair);
    fn clear(&self);
}

/// Token store that keeps the pair in process memory only.
#[derive(Default)]
pub struct MemoryTokenStore {
    pair: Mutex<Option<TokenPair>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<TokenPair> {
        self.pair.lock().ok().and_then(|p| p.clone())
    }

    fn save(&self, pair: &TokenPair) {
        if let Ok(mut slot) = self.pair.lock() {
            *slot = Some(pair.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.pair.lock() {
            *slot = None;
        }
    }
}

/// Token store backed by a JSON file, so sessions survive restarts.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<TokenPair> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::warn!("Failed to parse token file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, pair: &TokenPair) {
        let json = match serde_json::to_string_pretty(pair) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize tokens: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!("Failed to write token file {:?}: {}", self.path, e);
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!("Failed to remove token file {:?}: {}", self.path, e);
            }
        }
    }
}

struct SessionInner {
    session: RwLock<Session>,
    store: Box<dyn TokenStore>,
}

/// Shared, thread-safe handle to the session.
///
/// Writes are last-write-wins; readers always observe the latest value.
/// Every mutation is mirrored to the configured [`TokenStore`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl SessionStore {
    /// Creates a store and seeds the session from persisted tokens, if any.
    pub fn new(store: Box<dyn TokenStore>) -> Self {
        let session = match store.load() {
            Some(pair) => Session {
                access_token: Some(pair.access),
                refresh_token: Some(pair.refresh),
            },
            None => Session::default(),
        };
        Self {
            inner: Arc::new(SessionInner {
                session: RwLock::new(session),
                store,
            }),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryTokenStore::default()))
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    /// Installs a fresh token pair, e.g. after login.
    pub fn login(&self, pair: TokenPair) {
        {
            let mut session = self.write();
            session.access_token = Some(pair.access.clone());
            session.refresh_token = Some(pair.refresh.clone());
        }
        self.inner.store.save(&pair);
    }

    /// Replaces only the access token, keeping the refresh token.
    pub fn set_access_token(&self, access: String) {
        let persisted = {
            let mut session = self.write();
            session.access_token = Some(access.clone());
            session.refresh_token.clone().map(|refresh| TokenPair {
                access,
                refresh,
            })
        };
        if let Some(pair) = persisted {
            self.inner.store.save(&pair);
        }
    }

    /// Drops both tokens, in memory and in the backing store.
    pub fn clear(&self) {
        {
            let mut session = self.write();
            *session = Session::default();
        }
        self.inner.store.clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner
            .session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.inner
            .session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}
