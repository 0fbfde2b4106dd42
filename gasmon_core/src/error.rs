use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonitorError {
    #[error("status endpoint unreachable: {0}")]
    Transport(String),
    #[error("invalid settings: {0}")]
    Settings(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
