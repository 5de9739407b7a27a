//! Plain-text digest rendering and email delivery.

pub mod digest;
pub mod error;
pub mod mailer;

pub use digest::{render_digest, subject_for, NOTHING_NEW};
pub use error::DeliveryError;
pub use mailer::{Notifier, SmtpNotifier};
