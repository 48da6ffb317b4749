//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::ai::AiHandle;
use crate::api::error::{ApiError, ApiResult};
use crate::chat::ChatSession;
use crate::config::ApiConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// A chat session shared between the handler and its in-flight turn
pub type SharedSession = Arc<Mutex<ChatSession>>;

/// A live session and when it was last used
struct SessionEntry {
    session: SharedSession,
    /// Milliseconds since server start
    last_active_ms: AtomicU64,
}

/// Shared application state for all handlers
pub struct AppState {
    /// Text-generation collaborator
    pub ai: AiHandle,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Ground chat turns with web search
    pub chat_search: bool,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl AppState {
    pub fn new(ai: AiHandle, config: ApiConfig) -> Self {
        Self {
            ai,
            config: Arc::new(config),
            start_time: Instant::now(),
            chat_search: false,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Enable search grounding for new chat sessions
    pub fn with_chat_search(mut self, enabled: bool) -> Self {
        self.chat_search = enabled;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.start_time.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Open a new chat session and return a snapshot of it.
    ///
    /// When the limit is reached, sessions idle for longer than
    /// `session_idle_secs` with no reply pending are reclaimed first.
    pub async fn create_session(&self) -> ApiResult<ChatSession> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_chat_sessions {
            self.evict_idle(&mut sessions);
        }
        if sessions.len() >= self.config.max_chat_sessions {
            return Err(ApiError::ServiceUnavailable(format!(
                "chat session limit of {} reached",
                self.config.max_chat_sessions
            )));
        }

        let session = ChatSession::new(&self.ai).with_search(self.chat_search);
        let snapshot = session.clone();
        sessions.insert(
            session.id(),
            SessionEntry {
                session: Arc::new(Mutex::new(session)),
                last_active_ms: AtomicU64::new(self.now_ms()),
            },
        );

        tracing::info!(session_id = %snapshot.id(), active = sessions.len(), "Chat session created");
        Ok(snapshot)
    }

    /// Look up a session and mark it active
    pub async fn session(&self, id: Uuid) -> ApiResult<SharedSession> {
        let sessions = self.sessions.read().await;
        let entry = sessions
            .get(&id)
            .ok_or_else(|| ApiError::NotFound(format!("chat session {}", id)))?;
        entry.last_active_ms.store(self.now_ms(), Ordering::Relaxed);
        Ok(Arc::clone(&entry.session))
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, SessionEntry>) {
        let now = self.now_ms();
        let idle_ms = Duration::from_secs(self.config.session_idle_secs).as_millis();
        let before = sessions.len();

        sessions.retain(|_, entry| {
            let last = entry.last_active_ms.load(Ordering::Relaxed);
            if u128::from(now.saturating_sub(last)) < idle_ms {
                return true;
            }
            // A locked session is being used right now
            match entry.session.try_lock() {
                Ok(session) => session.is_busy(),
                Err(_) => true,
            }
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, active = sessions.len(), "Idle chat sessions reclaimed");
        }
    }

    /// Discard a session. An in-flight turn still finishes on its own copy.
    pub async fn remove_session(&self, id: Uuid) -> ApiResult<()> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session_id = %id, "Chat session removed");
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("chat session {}", id))),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::mock::{handle, ScriptedGenerator};

    fn state(max_chat_sessions: usize, session_idle_secs: u64) -> AppState {
        let config = ApiConfig {
            max_chat_sessions,
            session_idle_secs,
            ..Default::default()
        };
        AppState::new(handle(Arc::new(ScriptedGenerator::new())), config)
    }

    #[tokio::test]
    async fn test_idle_session_reclaimed_when_full() {
        let state = state(1, 0);
        let first = state.create_session().await.unwrap().id();

        let second = state.create_session().await.unwrap().id();
        assert_eq!(state.session_count().await, 1);
        assert!(matches!(state.session(first).await, Err(ApiError::NotFound(_))));
        assert!(state.session(second).await.is_ok());
    }

    #[tokio::test]
    async fn test_busy_session_never_reclaimed() {
        let state = state(1, 0);
        let id = state.create_session().await.unwrap().id();
        state.session(id).await.unwrap().lock().await.begin_turn("hi").unwrap();

        assert!(matches!(
            state.create_session().await,
            Err(ApiError::ServiceUnavailable(_))
        ));
        assert!(state.session(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_active_session_kept() {
        let state = state(1, 3600);
        let id = state.create_session().await.unwrap().id();

        assert!(state.create_session().await.is_err());
        assert!(state.session(id).await.is_ok());
    }
}
