use std::sync::Arc;
use tokio::sync::Mutex;

use crate::fleet::Fleet;
use crate::session::SessionStore;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fleet: Arc<Fleet>,
    pub sessions: Arc<Mutex<SessionStore>>,
}

impl AppState {
    pub fn new(config: Config, fleet: Fleet) -> Self {
        let fleet = Arc::new(fleet);
        let sessions = SessionStore::new(fleet.clone(), config.sessions.max_sessions);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(sessions)),
            fleet,
        }
    }
}
