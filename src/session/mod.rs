mod error;
mod reaper;
mod session;
mod store;

pub use error::SessionError;
pub use reaper::SessionReaper;
pub use session::Session;
pub use store::SessionStore;
