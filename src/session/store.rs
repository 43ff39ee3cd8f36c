use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::fleet::Fleet;
use crate::session::{Session, SessionError};

/// Live dashboard sessions, keyed by a random id. At most `max_sessions`
/// exist at once.
pub struct SessionStore {
    fleet: Arc<Fleet>,
    sessions: HashMap<Uuid, Session>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(fleet: Arc<Fleet>, max_sessions: usize) -> Self {
        Self {
            fleet,
            sessions: HashMap::new(),
            max_sessions,
        }
    }

    pub fn create(&mut self, now: DateTime<Utc>) -> Result<Uuid, SessionError> {
        if self.sessions.len() >= self.max_sessions {
            log::warn!(
                "Refusing new session, {} sessions already open",
                self.sessions.len()
            );
            return Err(SessionError::LimitReached {
                limit: self.max_sessions,
            });
        }

        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Session::new(self.fleet.clone(), now));
        log::info!("Created session {}", id);
        Ok(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    /// Look up a session for use, marking it active at `now`.
    pub fn get_mut(&mut self, id: &Uuid, now: DateTime<Utc>) -> Option<&mut Session> {
        let session = self.sessions.get_mut(id)?;
        session.touch(now);
        Some(session)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<Session> {
        let removed = self.sessions.remove(id);
        if removed.is_some() {
            log::info!("Closed session {}", id);
        }
        removed
    }

    /// Drop every session idle for longer than `idle_timeout`.
    pub fn reap_idle(&mut self, now: DateTime<Utc>, idle_timeout: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| now - session.last_active() <= idle_timeout);
        let reaped = before - self.sessions.len();
        if reaped > 0 {
            log::info!("Reaped {} idle sessions", reaped);
        }
        reaped
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn store(max_sessions: usize) -> SessionStore {
        SessionStore::new(Arc::new(Fleet::builtin()), max_sessions)
    }

    #[test]
    fn create_get_remove() {
        let mut store = store(10);
        let id = store.create(t(0)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&id).unwrap().selected_satellite_id().as_str(),
            "SAT-001"
        );
        assert!(store.remove(&id).is_some());
        assert!(store.remove(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn reaps_only_idle_sessions() {
        let mut store = store(10);
        let stale = store.create(t(0)).unwrap();
        let fresh = store.create(t(0)).unwrap();
        store.get_mut(&fresh, t(25)).unwrap().navigate_next(t(25));

        assert_eq!(store.reap_idle(t(30), Duration::minutes(30)), 0);
        assert_eq!(store.reap_idle(t(31), Duration::minutes(30)), 1);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&fresh).is_some());
    }

    #[test]
    fn lookup_counts_as_activity() {
        let mut store = store(10);
        let id = store.create(t(0)).unwrap();
        assert!(store.get_mut(&id, t(20)).is_some());
        assert_eq!(store.get(&id).unwrap().last_active(), t(20));

        assert_eq!(store.reap_idle(t(45), Duration::minutes(30)), 0);
        assert_eq!(store.reap_idle(t(51), Duration::minutes(30)), 1);
        assert!(store.get_mut(&id, t(52)).is_none());
    }

    #[test]
    fn refuses_sessions_past_the_limit() {
        let mut store = store(2);
        let first = store.create(t(0)).unwrap();
        store.create(t(0)).unwrap();
        assert_eq!(
            store.create(t(0)),
            Err(SessionError::LimitReached { limit: 2 })
        );
        assert_eq!(store.len(), 2);

        store.remove(&first);
        assert!(store.create(t(1)).is_ok());
    }
}
