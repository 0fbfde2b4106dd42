use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(String),
    #[error("status request timed out")]
    Timeout,
    #[error("unexpected http status {0}")]
    Status(u16),
    #[error("undecodable status payload: {0}")]
    Decode(String),
    #[error("malformed status sample: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SourceError::Timeout
        } else if let Some(code) = e.status() {
            SourceError::Status(code.as_u16())
        } else {
            SourceError::Http(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
