//! src/domain/message.rs
use crate::domain::Mailbox;
use std::path::PathBuf;
use validator::validate_email;

#[derive(thiserror::Error, Debug)]
pub enum MessageError {
    #[error("The message has no recipients")]
    NoRecipients,
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentContent {
    /// Bytes the host already holds in memory.
    Inline(Vec<u8>),
    /// A file the host stored on disk; read when the payload is built.
    Path(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: AttachmentContent,
}

impl Attachment {
    pub fn inline(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: AttachmentContent::Inline(data.into()),
        }
    }

    pub fn from_path(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            content: AttachmentContent::Path(path.into()),
        }
    }
}

/// The host's view of an outgoing email.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    pub subject: String,
    pub to: Vec<Mailbox>,
    pub cc: Vec<Mailbox>,
    pub bcc: Vec<Mailbox>,
    pub html_body: Option<String>,
    pub plain_text: Option<String>,
    pub reply_to: Option<Mailbox>,
    pub attachments: Vec<Attachment>,
}

impl OutboundMessage {
    pub fn builder(subject: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(subject)
    }

    /// The HTML body, with an empty string treated as no body at all.
    pub fn html(&self) -> Option<&str> {
        self.html_body.as_deref().filter(|body| !body.is_empty())
    }

    /// The plain-text alternative, with an empty string treated as missing.
    pub fn text(&self) -> Option<&str> {
        self.plain_text.as_deref().filter(|text| !text.is_empty())
    }

    /// Checks that there is someone to deliver to and that every address
    /// the provider will see is well formed.
    pub fn validate(&self) -> Result<(), MessageError> {
        if self.to.is_empty() {
            return Err(MessageError::NoRecipients);
        }

        let addresses = self
            .to
            .iter()
            .chain(self.cc.iter())
            .chain(self.bcc.iter())
            .chain(self.reply_to.iter());

        for mailbox in addresses {
            if !validate_email(&mailbox.email) {
                return Err(MessageError::InvalidAddress(mailbox.email.clone()));
            }
        }

        Ok(())
    }
}

pub struct MessageBuilder {
    message: OutboundMessage,
}

impl MessageBuilder {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            message: OutboundMessage {
                subject: subject.into(),
                ..OutboundMessage::default()
            },
        }
    }

    pub fn to(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.to.push(mailbox.into());
        self
    }

    pub fn cc(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.cc.push(mailbox.into());
        self
    }

    pub fn bcc(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.bcc.push(mailbox.into());
        self
    }

    pub fn reply_to(mut self, mailbox: impl Into<Mailbox>) -> Self {
        self.message.reply_to = Some(mailbox.into());
        self
    }

    pub fn html_body(mut self, html_body: impl Into<String>) -> Self {
        self.message.html_body = Some(html_body.into());
        self
    }

    pub fn plain_text(mut self, plain_text: impl Into<String>) -> Self {
        self.message.plain_text = Some(plain_text.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.message.attachments.push(attachment);
        self
    }

    pub fn build(self) -> OutboundMessage {
        self.message
    }
}
