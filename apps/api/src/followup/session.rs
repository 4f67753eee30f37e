//! Per-session state that must survive between generating a draft and dispatching it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::drafting::DraftEmail;
use crate::summary::Summary;

#[derive(Debug, Clone, Serialize)]
pub struct FollowupSession {
    pub session_id: Uuid,
    pub summary: Summary,
    pub draft: DraftEmail,
    pub recipient: String,
    pub student_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FollowupSession {
    pub fn new(
        summary: Summary,
        draft: DraftEmail,
        recipient: String,
        student_name: Option<String>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            summary,
            draft,
            recipient,
            student_name,
            created_at: Utc::now(),
        }
    }
}

/// In-memory store keyed by session id. Cleared when the process restarts.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, FollowupSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a session.
    pub async fn insert(&self, session: FollowupSession) {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session);
    }

    pub async fn get(&self, session_id: Uuid) -> Option<FollowupSession> {
        self.sessions.read().await.get(&session_id).cloned()
    }

    /// Applies `f` to the stored session and returns the updated copy.
    pub async fn update<F>(&self, session_id: Uuid, f: F) -> Option<FollowupSession>
    where
        F: FnOnce(&mut FollowupSession),
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&session_id)?;
        f(session);
        Some(session.clone())
    }

    pub async fn remove(&self, session_id: Uuid) -> Option<FollowupSession> {
        self.sessions.write().await.remove(&session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
