use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(String),
}
