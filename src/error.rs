//! Error types for Bookmerge

use thiserror::Error;

/// Application error codes, used as the process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    IoFailure = 2,
    BadCsv = 3,
    BadJson = 4,
    HttpFailure = 5,
    BadConfig = 6,
    NoSuchData = 7,
    BadValue = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Stable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Io(_) => ErrorCode::IoFailure,
            AppError::Csv(_) => ErrorCode::BadCsv,
            AppError::Json(_) => ErrorCode::BadJson,
            AppError::Http(_) => ErrorCode::HttpFailure,
            AppError::Config(_) => ErrorCode::BadConfig,
            AppError::MissingInput(_) => ErrorCode::NoSuchData,
            AppError::Validation(_) => ErrorCode::BadValue,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
