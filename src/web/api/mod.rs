pub mod error;
pub mod fleet;
pub mod forecast;
pub mod sessions;
