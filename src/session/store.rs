use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::context::DialogContext;
use super::key::SessionKey;

/// Chat conversations untouched for this long are forgotten.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug)]
struct Session {
    context: Arc<Mutex<DialogContext>>,
    last_used: Instant,
}

/// Per-conversation dialog contexts.
///
/// Callers lock the returned context for a whole turn, which keeps turns of
/// one conversation in order while other conversations proceed in parallel.
/// Idle chat sessions are dropped the next time any session is opened; the
/// console session lives as long as the process.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionKey, Session>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub async fn context(&self, key: &SessionKey) -> Arc<Mutex<DialogContext>> {
        let mut sessions = self.sessions.lock().await;
        let now = Instant::now();
        sessions.retain(|other, session| {
            let keep = other == key
                || *other == SessionKey::Console
                || Arc::strong_count(&session.context) > 1
                || now.duration_since(session.last_used) < self.idle_timeout;
            if !keep {
                tracing::debug!(session = %other, "dropping idle dialog context");
            }
            keep
        });

        let session = sessions.entry(*key).or_insert_with(|| {
            tracing::debug!(session = %key, "opening dialog context");
            Session {
                context: Arc::new(Mutex::new(DialogContext::default())),
                last_used: now,
            }
        });
        session.last_used = now;
        Arc::clone(&session.context)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
