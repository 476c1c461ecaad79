//! Notifier: delivers the digest of newly recorded postings, once per run.

pub mod digest;
pub mod email;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::models::posting::SeenPosting;

pub use digest::compose_digest;
pub use email::EmailNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivery backend for the run digest. Never called with an empty slice.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, postings: &[SeenPosting]) -> Result<(), NotifyError>;
}

/// Fallback when mail settings are incomplete: writes the digest to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, postings: &[SeenPosting]) -> Result<(), NotifyError> {
        let digest = compose_digest(postings);
        info!("{}\n\n{}", digest.subject, digest.body);
        Ok(())
    }
}
