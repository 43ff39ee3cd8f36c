use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("session limit of {limit} reached")]
    LimitReached { limit: usize },
}
