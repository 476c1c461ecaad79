use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use super::{compose_digest, Notifier, NotifyError};
use crate::config::MailConfig;
use crate::models::posting::SeenPosting;

/// Port that speaks TLS from the first byte; every other port upgrades with STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Sends the digest as one plain-text email over authenticated SMTP.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Validates addresses and builds the transport. No connection is made until `send`.
    pub fn new(mail: &MailConfig) -> Result<Self, NotifyError> {
        let builder = if mail.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&mail.smtp_server)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.smtp_server)?
        };

        let transport = builder
            .port(mail.smtp_port)
            .credentials(Credentials::new(mail.sender.clone(), mail.password.clone()))
            .build();

        Ok(Self {
            transport,
            from: mail.sender.parse()?,
            to: mail.recipient.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, postings: &[SeenPosting]) -> Result<(), NotifyError> {
        let digest = compose_digest(postings);
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(digest.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(digest.body)?;

        self.transport.send(message).await?;
        info!(
            "Email notification sent to {} with {} new jobs",
            self.to,
            postings.len()
        );
        Ok(())
    }
}
