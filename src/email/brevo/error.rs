//! src/email/brevo/error.rs
use super::client::RequestError;
use super::email::AttachmentReadError;
use crate::configuration::ConfigurationError;
use crate::domain::MessageError;

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error(transparent)]
    Attachment(#[from] AttachmentReadError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The only error `send` hands back to the host.
#[derive(thiserror::Error)]
#[error("Failed to send email: {0}")]
pub struct SendFailure(#[from] DispatchError);

impl SendFailure {
    pub fn dispatch_error(&self) -> &DispatchError {
        &self.0
    }
}

impl std::fmt::Debug for SendFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// The only error `test_connection` hands back to the host.
#[derive(thiserror::Error)]
#[error("Connection test failed: {0}")]
pub struct ConnectionTestError(#[from] DispatchError);

impl ConnectionTestError {
    pub fn dispatch_error(&self) -> &DispatchError {
        &self.0
    }
}

impl std::fmt::Debug for ConnectionTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
