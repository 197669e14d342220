//! Process-wide login state shared with the rest of the app.

use shared::domain::UserProfile;
use tokio::sync::{broadcast, RwLock};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub profile: Option<UserProfile>,
    pub token: Option<String>,
    pub logged_in: bool,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(Session),
    LoggedOut,
}

pub struct SessionStore {
    current: RwLock<Session>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            current: RwLock::new(Session::logged_out()),
            events,
        }
    }

    /// Replaces the session in one write. Profile, token and flag change together.
    pub async fn establish(&self, profile: UserProfile, token: Option<String>) -> Session {
        let session = Session {
            profile: Some(profile),
            token,
            logged_in: true,
        };
        {
            let mut guard = self.current.write().await;
            *guard = session.clone();
        }
        info!("session established");
        let _ = self.events.send(SessionEvent::LoggedIn(session.clone()));
        session
    }

    pub async fn sign_out(&self) {
        {
            let mut guard = self.current.write().await;
            if !guard.logged_in {
                return;
            }
            *guard = Session::logged_out();
        }
        info!("session cleared");
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    pub async fn snapshot(&self) -> Session {
        self.current.read().await.clone()
    }

    pub async fn is_logged_in(&self) -> bool {
        self.current.read().await.logged_in
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn starts_logged_out() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot().await, Session::logged_out());
        assert!(!store.is_logged_in().await);
    }

    #[tokio::test]
    async fn establish_sets_profile_and_flag_together() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        let session = store
            .establish(UserProfile(json!({"id": 1})), Some("tok".to_string()))
            .await;

        assert_eq!(store.snapshot().await, session);
        assert!(session.logged_in);
        assert_eq!(session.profile, Some(UserProfile(json!({"id": 1}))));
        assert_eq!(rx.recv().await.expect("event"), SessionEvent::LoggedIn(session));
    }

    #[tokio::test]
    async fn sign_out_is_noop_when_already_logged_out() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.sign_out().await;
        assert!(rx.try_recv().is_err());

        store.establish(UserProfile(json!({"id": 2})), None).await;
        store.sign_out().await;
        assert!(matches!(rx.recv().await, Ok(SessionEvent::LoggedIn(_))));
        assert_eq!(rx.recv().await.expect("event"), SessionEvent::LoggedOut);
        assert_eq!(store.snapshot().await, Session::logged_out());
    }
}
