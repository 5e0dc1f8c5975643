use std::fmt;

#[derive(Debug, Clone)]
pub enum RelayError {
    StartupFailed(String),
    BindFailed(String),
    AcceptFailed(String),
    DialFailed(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::StartupFailed(msg) => write!(f, "Startup failed: {}", msg),
            RelayError::BindFailed(msg) => write!(f, "Bind failed: {}", msg),
            RelayError::AcceptFailed(msg) => write!(f, "Accept failed: {}", msg),
            RelayError::DialFailed(msg) => write!(f, "Dial failed: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

pub type Result<T> = std::result::Result<T, RelayError>;
