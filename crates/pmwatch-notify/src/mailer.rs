//! Digest delivery over authenticated SMTP submission.

use std::future::Future;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use pmwatch_core::ScoredPosting;

use crate::digest::{render_digest, subject_for};
use crate::error::DeliveryError;

/// Delivers the run's digest. Returns `true` when the digest was handed off.
pub trait Notifier {
    fn notify(
        &self,
        postings: &[ScoredPosting],
        errors: &[String],
    ) -> impl Future<Output = bool>;
}

/// Sends the digest from the configured account to itself via STARTTLS.
pub struct SmtpNotifier {
    host: String,
    user: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl SmtpNotifier {
    #[must_use]
    pub fn new(host: &str, user: Option<String>, password: Option<String>) -> Self {
        Self {
            host: host.to_owned(),
            user,
            password,
        }
    }

    /// Builds the outgoing message addressed from and to `user`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Address`] for an unparseable address or
    /// [`DeliveryError::Build`] if the message cannot be assembled.
    pub fn build_message(user: &str, subject: &str, body: String) -> Result<Message, DeliveryError> {
        let mailbox: Mailbox = user.parse()?;
        let message = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;
        Ok(message)
    }

    /// Renders and sends the digest.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::MissingCredentials`] when either credential
    /// is absent, or any address, build or transport error.
    pub async fn send_digest(
        &self,
        postings: &[ScoredPosting],
        errors: &[String],
    ) -> Result<(), DeliveryError> {
        let (Some(user), Some(password)) = (self.user.as_deref(), self.password.as_deref()) else {
            return Err(DeliveryError::MissingCredentials);
        };

        let subject = subject_for(chrono::Local::now().date_naive());
        let message = Self::build_message(user, &subject, render_digest(postings, errors))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .credentials(Credentials::new(user.to_owned(), password.to_owned()))
            .build();
        transport.send(message).await?;
        Ok(())
    }
}

impl Notifier for SmtpNotifier {
    async fn notify(&self, postings: &[ScoredPosting], errors: &[String]) -> bool {
        match self.send_digest(postings, errors).await {
            Ok(()) => {
                tracing::info!(
                    to = self.user.as_deref().unwrap_or_default(),
                    postings = postings.len(),
                    errors = errors.len(),
                    "digest sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "digest not sent");
                false
            }
        }
    }
}
