/// Error type shared by every layer of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Request could not be sent or the server answered with a non-2xx status
    Network(String),
    /// Response or configuration body could not be decoded
    Parse(String),
    /// Treemap hierarchy could not be built
    Layout(String),
    /// Input rejected by a domain constructor
    Validation(String),
    Config(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network Error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse Error: {}", msg),
            AppError::Layout(msg) => write!(f, "Layout Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Config(msg) => write!(f, "Config Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Parse(error.to_string())
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(e) => AppError::Parse(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type NetworkResult<T> = Result<T, AppError>;
pub type LayoutResult<T> = Result<T, AppError>;
