use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::core::session::Session;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Root for saved uploads and per-session index directories.
    pub data_dir: PathBuf,
    /// All live sessions.
    pub sessions: SessionStore,
}

impl AppState {
    /// Load shared state from environment variables.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            sessions: SessionStore::new(),
        }
    }
}

/// In-memory session store.
///
/// Each session is wrapped in its own async mutex so all interactions of
/// one session are serialized, while separate sessions proceed in
/// parallel over their own scoped index directories.
pub struct SessionStore {
    inner: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a new session and returns its id.
    pub async fn insert(&self, session: Session) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Fetches a session handle by id.
    pub async fn get(&self, id: &Uuid) -> Option<Arc<Mutex<Session>>> {
        self.inner.read().await.get(id).cloned()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
