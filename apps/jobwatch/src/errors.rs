use thiserror::Error;

use crate::notify::NotifyError;
use crate::resume::ResumeError;
use crate::sources::FetchError;
use crate::store::StoreError;

/// Application-level error type.
/// Anything that reaches `main` as an `AppError` aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume error: {0}")]
    Resume(#[from] ResumeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Notifier setup error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code, logged alongside fatal errors.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Resume(_) => "RESUME_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Fetch(_) => "HTTP_CLIENT_ERROR",
            AppError::Notify(_) => "NOTIFIER_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
