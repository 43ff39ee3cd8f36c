use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid fleet definition: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("fleet has no satellites")]
    Empty,
    #[error("duplicate satellite id: {0}")]
    DuplicateId(String),
}
