use std::fmt;

#[derive(Debug)]
pub enum SdError {
    ConfigError(String),
    BackendUnavailable(String),
    BackendError(String),
    FetchError(String),
    SessionError(String),
}

impl fmt::Display for SdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SdError::BackendUnavailable(msg) => write!(f, "Backend unavailable: {}", msg),
            SdError::BackendError(msg) => write!(f, "Backend error: {}", msg),
            SdError::FetchError(msg) => write!(f, "Fetch error: {}", msg),
            SdError::SessionError(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for SdError {}

pub type Result<T> = std::result::Result<T, SdError>;
