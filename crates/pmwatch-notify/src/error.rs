use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("GMAIL_USER and GMAIL_APP_PASSWORD must both be set")]
    MissingCredentials,

    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
