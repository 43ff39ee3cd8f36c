pub mod api;
pub mod api_doc;
pub mod config;
pub mod server;
pub mod state;
pub mod ui;

pub use config::Config;
pub use server::{router, run_server, ServerError};
pub use state::AppState;
